use crate::data::{Chunkable, Sliceable};
use anyhow::Context;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

pub const DEFAULT_SIZE_PARAMETER: &str = "size";
pub const DEFAULT_DIRECTION_PARAMETER: &str = "direction";
pub const DEFAULT_PAGE_NUMBER_PARAMETER: &str = "page_number";
pub const DEFAULT_NEXT_PARAMETER: &str = "next";
pub const DEFAULT_PREV_PARAMETER: &str = "prev";
pub const DEFAULT_PREFIX: &str = "";
pub const DEFAULT_QUALIFIER_DELIMITER: &str = "_";
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 2000;
pub const DEFAULT_PAGE_NUMBER: u32 = 0;

pub const DEFAULT_SLICE_REQUEST: Sliceable =
    Sliceable::of(DEFAULT_PAGE_NUMBER, None, DEFAULT_MAX_PAGE_SIZE);

pub fn default_chunk_request() -> Chunkable {
    Chunkable::new(None, None, Some(DEFAULT_MAX_PAGE_SIZE), None)
}

/// Process wide resolver settings. Read only once the server is up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Validate)]
#[builder(default, setter(into), build_fn(validate = "Self::validate_ceiling"))]
#[serde(default)]
pub struct PaginationConfig {
    pub size_parameter_name: String,
    pub direction_parameter_name: String,
    pub page_number_parameter_name: String,
    pub next_parameter_name: String,
    pub prev_parameter_name: String,
    pub prefix: String,
    pub qualifier_delimiter: String,
    /// Upper bound applied to any requested page size.
    #[validate(range(min = 1))]
    pub max_page_size: u32,
    /// Page number used when the endpoint default has none.
    pub init_page_number: u32,
    pub fallback_sliceable: Sliceable,
    pub fallback_chunkable: Chunkable,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            size_parameter_name: DEFAULT_SIZE_PARAMETER.to_owned(),
            direction_parameter_name: DEFAULT_DIRECTION_PARAMETER.to_owned(),
            page_number_parameter_name: DEFAULT_PAGE_NUMBER_PARAMETER.to_owned(),
            next_parameter_name: DEFAULT_NEXT_PARAMETER.to_owned(),
            prev_parameter_name: DEFAULT_PREV_PARAMETER.to_owned(),
            prefix: DEFAULT_PREFIX.to_owned(),
            qualifier_delimiter: DEFAULT_QUALIFIER_DELIMITER.to_owned(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            init_page_number: DEFAULT_PAGE_NUMBER,
            fallback_sliceable: DEFAULT_SLICE_REQUEST,
            fallback_chunkable: default_chunk_request(),
        }
    }
}

impl PaginationConfigBuilder {
    fn validate_ceiling(&self) -> Result<(), String> {
        match self.max_page_size {
            Some(0) => Err("max_page_size must not be less than one".to_owned()),
            _ => Ok(()),
        }
    }
}

impl PaginationConfig {
    pub fn builder() -> PaginationConfigBuilder {
        PaginationConfigBuilder::default()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, anyhow::Error> {
        let config: Self = toml::from_str(raw).context("parse pagination config")?;
        config.validate().context("validate pagination config")?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read pagination config {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Full request parameter name for `source`, honouring prefix and qualifier.
    pub fn parameter_name(&self, source: &str, qualifier: Option<&str>) -> String {
        let mut name = String::from(&self.prefix);
        if let Some(qualifier) = qualifier {
            name.push_str(qualifier);
            name.push_str(&self.qualifier_delimiter);
        }
        name.push_str(source);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Direction;

    #[test]
    pub fn test_defaults() {
        let config = PaginationConfig::default();
        assert_eq!(config.max_page_size, 2000);
        assert_eq!(config.fallback_sliceable, Sliceable::of(0, None, 2000));
        assert_eq!(config.fallback_chunkable.max_page_size(), Some(2000));
        assert_eq!(config.parameter_name("size", None), "size");
        assert_eq!(config.parameter_name("size", Some("foo")), "foo_size");
    }

    #[test]
    pub fn test_builder() {
        let config = PaginationConfig::builder()
            .prefix("p.")
            .qualifier_delimiter("-")
            .max_page_size(100u32)
            .build()
            .unwrap();
        assert_eq!(config.parameter_name("next", Some("users")), "p.users-next");
        assert_eq!(config.size_parameter_name, "size");
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    pub fn test_builder_rejects_zero_ceiling() {
        let err = PaginationConfig::builder()
            .max_page_size(0u32)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("max_page_size"));
    }

    #[test]
    pub fn test_from_toml() {
        let config = PaginationConfig::from_toml_str(
            r#"
            page_number_parameter_name = "page"
            max_page_size = 500

            [fallback_sliceable]
            page_number = 1
            direction = "DESC"
            max_content_size = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.page_number_parameter_name, "page");
        assert_eq!(config.size_parameter_name, "size");
        assert_eq!(config.max_page_size, 500);
        assert_eq!(
            config.fallback_sliceable,
            Sliceable::of(1, Some(Direction::Desc), 50)
        );
        assert_eq!(config.fallback_chunkable, default_chunk_request());
    }

    #[test]
    pub fn test_from_toml_rejects_zero_ceiling() {
        assert!(PaginationConfig::from_toml_str("max_page_size = 0").is_err());
    }
}
