use super::endpoint::{ChunkableBinding, ChunkableDefault, ConfigError, DeclaredParameter};
use super::params::ParameterSource;
use super::resolver::{checked_config, resolve_size, PaginationResolver, ResolveError};
use crate::config::PaginationConfig;
use crate::data::{Chunkable, Direction, PaginationRelation};
use std::sync::Arc;
use tracing::debug;

/// Resolves cursor pagination (`size`, `direction`, `next`, `prev`) from a request.
///
/// `next` wins over `prev` when both are given. A cursor has no offset, so nothing is
/// validated beyond the size clamp.
#[derive(Debug, Clone)]
pub struct ChunkableResolver {
    config: Arc<PaginationConfig>,
}

impl ChunkableResolver {
    /// Fails when `config` carries a ceiling below one.
    pub fn new(config: Arc<PaginationConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            config: checked_config(config)?,
        })
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn fallback(&self) -> &Chunkable {
        &self.config.fallback_chunkable
    }

    fn default_or_fallback(&self, defaults: Option<&ChunkableDefault>) -> Chunkable {
        match defaults {
            Some(d) => Chunkable::first(d.size, d.direction),
            None => self.config.fallback_chunkable.clone(),
        }
    }
}

impl Default for ChunkableResolver {
    fn default() -> Self {
        Self {
            config: Arc::new(PaginationConfig::default()),
        }
    }
}

impl PaginationResolver for ChunkableResolver {
    type Descriptor = Chunkable;
    type Defaults = ChunkableDefault;

    fn resolve<P>(&self, params: &P, binding: &ChunkableBinding) -> Result<Chunkable, ResolveError>
    where
        P: ParameterSource + ?Sized,
    {
        let config = &self.config;
        let qualifier = binding.qualifier();
        let size_raw = params.text(&config.parameter_name(&config.size_parameter_name, qualifier));
        let direction_raw =
            params.text(&config.parameter_name(&config.direction_parameter_name, qualifier));
        let next_raw = params.text(&config.parameter_name(&config.next_parameter_name, qualifier));
        let prev_raw = params.text(&config.parameter_name(&config.prev_parameter_name, qualifier));

        let default = self.default_or_fallback(binding.checked_defaults()?);
        if size_raw.is_none() && direction_raw.is_none() && next_raw.is_none() && prev_raw.is_none()
        {
            return Ok(default);
        }

        let size = resolve_size(
            size_raw,
            default.max_page_size().unwrap_or(config.max_page_size),
            config.max_page_size,
        );
        let direction = Direction::from_optional_str(direction_raw).or(default.direction());
        let (token, relation) = match (next_raw, prev_raw) {
            (Some(next), _) => (Some(next.to_owned()), Some(PaginationRelation::Next)),
            (None, Some(prev)) => (Some(prev.to_owned()), Some(PaginationRelation::Prev)),
            (None, None) => (
                default.pagination_token().map(str::to_owned),
                default.pagination_relation(),
            ),
        };

        let chunkable = Chunkable::new(token, relation, Some(size), direction);
        debug!(chunkable = ?chunkable, "chunkable resolved");
        Ok(chunkable)
    }

    fn binding_of(parameter: &DeclaredParameter) -> Option<&ChunkableBinding> {
        match parameter {
            DeclaredParameter::Chunkable(binding) => Some(binding),
            _ => None,
        }
    }

    fn kind() -> &'static str {
        "chunkable"
    }
}
