use super::direction::Direction;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Last addressable element index (exclusive) for offset pagination.
pub const MAX_TOTAL_CONTENT: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSliceable {
    #[error("pageNumber must be not null.")]
    MissingPageNumber,
    #[error("maxContentSize must be not null.")]
    MissingMaxContentSize,
    #[error("Cannot get elements beyond 2000.")]
    BeyondLimit,
}

/// Offset pagination request: which page of which size in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sliceable {
    page_number: Option<u32>,
    direction: Option<Direction>,
    max_content_size: Option<u32>,
}

impl Sliceable {
    pub const fn new(
        page_number: Option<u32>,
        direction: Option<Direction>,
        max_content_size: Option<u32>,
    ) -> Self {
        Self {
            page_number,
            direction,
            max_content_size,
        }
    }

    /// Shorthand for a fully populated request.
    pub const fn of(page_number: u32, direction: Option<Direction>, max_content_size: u32) -> Self {
        Self::new(Some(page_number), direction, Some(max_content_size))
    }

    pub fn page_number(&self) -> Option<u32> {
        self.page_number
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn max_content_size(&self) -> Option<u32> {
        self.max_content_size
    }

    /// `page_number * max_content_size`, or `None` while either is missing.
    pub fn offset(&self) -> Option<u64> {
        Some(u64::from(self.page_number?) * u64::from(self.max_content_size?))
    }

    pub fn validate(&self) -> Result<(), InvalidSliceable> {
        let page_number = self
            .page_number
            .ok_or(InvalidSliceable::MissingPageNumber)?;
        let size = self
            .max_content_size
            .ok_or(InvalidSliceable::MissingMaxContentSize)?;
        let last = u64::from(page_number) * u64::from(size) + u64::from(size);
        if last > MAX_TOTAL_CONTENT {
            return Err(InvalidSliceable::BeyondLimit);
        }
        Ok(())
    }

    /// Same direction and size, one page further.
    pub fn next(&self) -> Option<Self> {
        Some(Self {
            page_number: Some(self.page_number?.checked_add(1)?),
            ..*self
        })
    }
}

/// A read-only part of an item set, as returned by a repository for a [`Sliceable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice<T> {
    content: Vec<T>,
    sliceable: Option<Sliceable>,
    has_next: bool,
}

impl<T> Slice<T> {
    pub fn new(content: Vec<T>, sliceable: Option<Sliceable>, has_next: bool) -> Self {
        Self {
            content,
            sliceable,
            has_next,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None, false)
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn sliceable(&self) -> Option<&Sliceable> {
        self.sliceable.as_ref()
    }

    /// `None` when there is no originating request.
    pub fn page_number(&self) -> Option<u32> {
        self.sliceable.and_then(|s| s.page_number())
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.sliceable.is_some() && self.has_next
    }

    pub fn next_slice(&self) -> Option<Sliceable> {
        if !self.has_next() {
            return None;
        }
        self.sliceable.as_ref().and_then(Sliceable::next)
    }

    pub fn map<U, F>(self, f: F) -> Slice<U>
    where
        F: FnMut(T) -> U,
    {
        Slice {
            content: self.content.into_iter().map(f).collect(),
            sliceable: self.sliceable,
            has_next: self.has_next,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.content.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Index<usize> for Slice<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.content[index]
    }
}

impl<'a, T> IntoIterator for &'a Slice<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

impl<T> IntoIterator for Slice<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
