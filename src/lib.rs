//! Pagination helpers for axum services.
//!
//! Request side descriptors ([`data::Sliceable`] for offset pagination, [`data::Chunkable`]
//! for cursor pagination) are resolved from query parameters by the resolvers in [`web`],
//! results travel back as [`data::Slice`] and are rendered through [`data::SlicedResources`].

pub mod config;
pub mod data;
pub mod http;
pub mod logging;
pub mod web;

pub use config::PaginationConfig;
