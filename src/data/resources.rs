use super::slice::Slice;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Page metadata rendered next to the embedded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceMetadata {
    pub size: u64,
    #[serde(rename = "number")]
    pub page_number: Option<u32>,
    #[serde(rename = "has_next_page")]
    pub has_next_slice: bool,
}

impl SliceMetadata {
    pub fn new(size: u64, page_number: Option<u32>, has_next_slice: bool) -> Self {
        Self {
            size,
            page_number,
            has_next_slice,
        }
    }

    pub fn of<T>(slice: &Slice<T>) -> Self {
        Self::new(slice.len() as u64, slice.page_number(), slice.has_next())
    }
}

/// Response envelope of a slice, keyed by a caller chosen name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlicedResources<T> {
    #[serde(rename = "_embedded")]
    content: HashMap<String, Vec<T>>,
    #[serde(rename = "page")]
    metadata: SliceMetadata,
}

impl<T> SlicedResources<T> {
    pub fn new(key: impl Into<String>, content: Vec<T>, metadata: SliceMetadata) -> Self {
        Self {
            content: HashMap::from([(key.into(), content)]),
            metadata,
        }
    }

    pub fn from_slice(key: impl Into<String>, slice: Slice<T>) -> Self {
        let metadata = SliceMetadata::of(&slice);
        Self::new(key, slice.into_content(), metadata)
    }

    /// Converts each element with `wrapper` before wrapping.
    pub fn from_slice_with<U, F>(key: impl Into<String>, slice: Slice<U>, wrapper: F) -> Self
    where
        F: FnMut(U) -> T,
    {
        Self::from_slice(key, slice.map(wrapper))
    }

    /// Content without pagination context: no page number, no next page.
    pub fn from_content(key: impl Into<String>, content: Vec<T>) -> Self {
        let metadata = SliceMetadata::new(content.len() as u64, None, false);
        Self::new(key, content, metadata)
    }

    pub fn content(&self) -> &HashMap<String, Vec<T>> {
        &self.content
    }

    pub fn metadata(&self) -> &SliceMetadata {
        &self.metadata
    }
}
