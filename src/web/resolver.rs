use super::chunkable::ChunkableResolver;
use super::endpoint::{Binding, ConfigError, DeclaredParameter, Endpoint};
use super::params::ParameterSource;
use super::sliceable::SliceableResolver;
use crate::config::PaginationConfig;
use crate::data::{Chunkable, InvalidSliceable, Sliceable};
use validator::Validate;
use std::sync::Arc;
use tracing::trace;

/// Outcome of a failed resolution.
///
/// `Invalid` rejects the single request, `Config` means the endpoint itself is broken and
/// must not be retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Invalid(#[from] InvalidSliceable),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ResolveError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Turns raw request parameters into a pagination descriptor.
pub trait PaginationResolver {
    type Descriptor;
    type Defaults;

    fn resolve<P>(
        &self,
        params: &P,
        binding: &Binding<Self::Defaults>,
    ) -> Result<Self::Descriptor, ResolveError>
    where
        P: ParameterSource + ?Sized;

    /// The binding of `parameter`, if it has this resolver's kind.
    fn binding_of(parameter: &DeclaredParameter) -> Option<&Binding<Self::Defaults>>;

    fn kind() -> &'static str;

    /// Resolves the parameter at `position` of `endpoint`, checking the endpoint first.
    fn resolve_parameter<P>(
        &self,
        endpoint: &Endpoint,
        position: usize,
        params: &P,
    ) -> Result<Self::Descriptor, ResolveError>
    where
        P: ParameterSource + ?Sized,
    {
        endpoint.assert_uniqueness()?;
        let binding = endpoint
            .parameter(position)
            .and_then(Self::binding_of)
            .ok_or_else(|| ConfigError::KindMismatch {
                endpoint: endpoint.name().to_owned(),
                position,
                expected: Self::kind(),
            })?;
        self.resolve(params, binding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Sliceable(Sliceable),
    Chunkable(Chunkable),
    Skipped,
}

/// Both strategies over one shared configuration, picked by declared parameter kind.
#[derive(Debug, Clone)]
pub struct Resolvers {
    pub sliceable: SliceableResolver,
    pub chunkable: ChunkableResolver,
}

impl Resolvers {
    pub fn new(config: Arc<PaginationConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            sliceable: SliceableResolver::new(config.clone())?,
            chunkable: ChunkableResolver::new(config)?,
        })
    }

    /// One entry per declared parameter, in declaration order.
    pub fn resolve_all<P>(&self, endpoint: &Endpoint, params: &P) -> Result<Vec<Resolved>, ResolveError>
    where
        P: ParameterSource + ?Sized,
    {
        endpoint.assert_uniqueness()?;
        endpoint
            .parameters()
            .iter()
            .map(|parameter| match parameter {
                DeclaredParameter::Sliceable(binding) => self
                    .sliceable
                    .resolve(params, binding)
                    .map(Resolved::Sliceable),
                DeclaredParameter::Chunkable(binding) => self
                    .chunkable
                    .resolve(params, binding)
                    .map(Resolved::Chunkable),
                DeclaredParameter::Other => Ok(Resolved::Skipped),
            })
            .collect()
    }
}

impl Default for Resolvers {
    fn default() -> Self {
        Self {
            sliceable: SliceableResolver::default(),
            chunkable: ChunkableResolver::default(),
        }
    }
}

/// Rejects a ceiling below one, however the configuration was assembled.
pub(crate) fn checked_config(
    config: Arc<PaginationConfig>,
) -> Result<Arc<PaginationConfig>, ConfigError> {
    if config.validate().is_err() {
        return Err(ConfigError::InvalidMaxPageSize(config.max_page_size));
    }
    Ok(config)
}

/// Requested size, falling back to `prior` on malformed input, clamped to `[1, ceiling]`.
pub(crate) fn resolve_size(raw: Option<&str>, prior: u32, ceiling: u32) -> u32 {
    let mut size = i64::from(prior);
    if let Some(raw) = raw {
        match raw.parse::<i32>() {
            Ok(parsed) => size = i64::from(parsed),
            Err(e) => trace!(raw = raw, e = %e, "invalid page size"),
        }
    }
    // lower bound first, then upper
    let size = if size < 1 { 1 } else { size };
    let size = if size > i64::from(ceiling) {
        i64::from(ceiling)
    } else {
        size
    };
    u32::try_from(size).unwrap_or(ceiling)
}

/// Requested page number, falling back to `prior` on malformed or negative input.
pub(crate) fn resolve_page_number(raw: Option<&str>, prior: u32) -> u32 {
    let Some(raw) = raw else {
        return prior;
    };
    match raw.parse::<i32>().map(u32::try_from) {
        Ok(Ok(parsed)) => parsed,
        Ok(Err(_)) => {
            trace!(raw = raw, "negative page number");
            prior
        }
        Err(e) => {
            trace!(raw = raw, e = %e, "invalid page number");
            prior
        }
    }
}
