pub mod chunk;
pub mod direction;
pub mod repository;
pub mod resources;
pub mod slice;

pub use chunk::{Chunkable, PaginationRelation};
pub use direction::Direction;
pub use repository::SliceableRepository;
pub use resources::{SliceMetadata, SlicedResources};
pub use slice::{InvalidSliceable, Slice, Sliceable, MAX_TOTAL_CONTENT};
