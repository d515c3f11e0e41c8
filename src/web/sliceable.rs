use super::endpoint::{ConfigError, DeclaredParameter, SliceableBinding, SliceableDefault};
use super::params::ParameterSource;
use super::resolver::{checked_config, resolve_page_number, resolve_size, PaginationResolver, ResolveError};
use crate::config::PaginationConfig;
use crate::data::{Direction, Sliceable};
use std::sync::Arc;
use tracing::debug;

/// Resolves offset pagination (`size`, `direction`, `page_number`) from a request.
#[derive(Debug, Clone)]
pub struct SliceableResolver {
    config: Arc<PaginationConfig>,
}

impl SliceableResolver {
    /// Fails when `config` carries a ceiling below one.
    pub fn new(config: Arc<PaginationConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            config: checked_config(config)?,
        })
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn fallback(&self) -> &Sliceable {
        &self.config.fallback_sliceable
    }

    fn default_or_fallback(&self, defaults: Option<&SliceableDefault>) -> Sliceable {
        match defaults {
            Some(d) => Sliceable::of(d.page_number, d.direction, d.size),
            None => self.config.fallback_sliceable,
        }
    }
}

impl Default for SliceableResolver {
    fn default() -> Self {
        Self {
            config: Arc::new(PaginationConfig::default()),
        }
    }
}

impl PaginationResolver for SliceableResolver {
    type Descriptor = Sliceable;
    type Defaults = SliceableDefault;

    fn resolve<P>(&self, params: &P, binding: &SliceableBinding) -> Result<Sliceable, ResolveError>
    where
        P: ParameterSource + ?Sized,
    {
        let config = &self.config;
        let qualifier = binding.qualifier();
        let size_name = config.parameter_name(&config.size_parameter_name, qualifier);
        let direction_name = config.parameter_name(&config.direction_parameter_name, qualifier);
        let page_number_name = config.parameter_name(&config.page_number_parameter_name, qualifier);

        let size_raw = params.text(&size_name);
        let direction_raw = params.text(&direction_name);
        let page_number_raw = params.text(&page_number_name);

        let default = self.default_or_fallback(binding.checked_defaults()?);
        // nothing asked: the default goes out as is, unclamped and unvalidated
        if size_raw.is_none() && direction_raw.is_none() && page_number_raw.is_none() {
            return Ok(default);
        }

        let size = resolve_size(
            size_raw,
            default.max_content_size().unwrap_or(config.max_page_size),
            config.max_page_size,
        );
        let direction = Direction::from_optional_str(direction_raw);
        let page_number = resolve_page_number(
            page_number_raw,
            default.page_number().unwrap_or(config.init_page_number),
        );

        let sliceable = Sliceable::of(page_number, direction, size);
        sliceable.validate()?;
        debug!(sliceable = ?sliceable, "sliceable resolved");
        Ok(sliceable)
    }

    fn binding_of(parameter: &DeclaredParameter) -> Option<&SliceableBinding> {
        match parameter {
            DeclaredParameter::Sliceable(binding) => Some(binding),
            _ => None,
        }
    }

    fn kind() -> &'static str {
        "sliceable"
    }
}
