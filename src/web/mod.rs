pub mod chunkable;
pub mod endpoint;
pub mod extract;
pub mod params;
pub mod resolver;
pub mod sliceable;

pub use chunkable::ChunkableResolver;
pub use endpoint::{
    Binding, ChunkableBinding, ChunkableDefault, ConfigError, DeclaredParameter, Endpoint,
    SliceableBinding, SliceableDefault,
};
pub use extract::{declare, Chunked, Sliced};
pub use params::ParameterSource;
pub use resolver::{PaginationResolver, ResolveError, Resolved, Resolvers};
pub use sliceable::SliceableResolver;
