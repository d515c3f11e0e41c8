use super::direction::Direction;
use serde::{Deserialize, Serialize};

/// Which side of the pagination token the caller wants to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaginationRelation {
    #[serde(rename = "NEXT")]
    Next,
    #[serde(rename = "PREV")]
    Prev,
}

/// Cursor pagination request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chunkable {
    pagination_token: Option<String>,
    pagination_relation: Option<PaginationRelation>,
    max_page_size: Option<u32>,
    direction: Option<Direction>,
}

impl Chunkable {
    pub fn new(
        pagination_token: Option<String>,
        pagination_relation: Option<PaginationRelation>,
        max_page_size: Option<u32>,
        direction: Option<Direction>,
    ) -> Self {
        Self {
            pagination_token,
            pagination_relation,
            max_page_size,
            direction,
        }
    }

    /// First chunk of the given size, no token.
    pub fn first(max_page_size: u32, direction: Option<Direction>) -> Self {
        Self::new(None, None, Some(max_page_size), direction)
    }

    pub fn pagination_token(&self) -> Option<&str> {
        self.pagination_token.as_deref()
    }

    pub fn pagination_relation(&self) -> Option<PaginationRelation> {
        self.pagination_relation
    }

    pub fn max_page_size(&self) -> Option<u32> {
        self.max_page_size
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Same size and order, positioned after `token`.
    pub fn next(&self, token: impl Into<String>) -> Self {
        Self {
            pagination_token: Some(token.into()),
            pagination_relation: Some(PaginationRelation::Next),
            ..self.clone()
        }
    }

    /// Same size and order, positioned before `token`.
    pub fn prev(&self, token: impl Into<String>) -> Self {
        Self {
            pagination_token: Some(token.into()),
            pagination_relation: Some(PaginationRelation::Prev),
            ..self.clone()
        }
    }
}
