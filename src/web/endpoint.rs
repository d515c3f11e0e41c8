//! Explicit per-endpoint declaration of pagination parameters.
//!
//! An endpoint lists every pagination descriptor it accepts, in order, together with an
//! optional qualifier and optional defaults. When more than one pagination descriptor is
//! declared, each one must be qualified and the qualifiers must differ, otherwise the
//! request parameters they read would collide.

use crate::data::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::error;
use validator::Validate;

pub const DEFAULT_ENDPOINT_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Ambiguous pagination arguments in endpoint {0}. \
         If you use multiple pagination parameters you need to qualify them"
    )]
    Ambiguous(String),
    #[error("Values of the qualifiers must be unique! endpoint {endpoint}, qualifier {qualifier}")]
    DuplicateQualifier { endpoint: String, qualifier: String },
    #[error("Invalid default page size {0} configured! Must not be less than one!")]
    InvalidDefaultSize(u32),
    #[error("Invalid max page size {0} configured! Must not be less than one!")]
    InvalidMaxPageSize(u32),
    #[error("Parameter {position} of endpoint {endpoint} is not a {expected} parameter")]
    KindMismatch {
        endpoint: String,
        position: usize,
        expected: &'static str,
    },
}

/// Endpoint level defaults for an offset pagination parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SliceableDefault {
    #[validate(range(min = 1))]
    pub size: u32,
    pub page_number: u32,
    pub direction: Option<Direction>,
}

impl Default for SliceableDefault {
    fn default() -> Self {
        Self {
            size: DEFAULT_ENDPOINT_SIZE,
            page_number: 0,
            direction: Some(Direction::Asc),
        }
    }
}

impl SliceableDefault {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

/// Endpoint level defaults for a cursor pagination parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChunkableDefault {
    #[validate(range(min = 1))]
    pub size: u32,
    pub direction: Option<Direction>,
}

impl Default for ChunkableDefault {
    fn default() -> Self {
        Self {
            size: DEFAULT_ENDPOINT_SIZE,
            direction: Some(Direction::Asc),
        }
    }
}

impl ChunkableDefault {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

pub(crate) trait DefaultSize {
    fn size(&self) -> u32;
}

impl DefaultSize for SliceableDefault {
    fn size(&self) -> u32 {
        self.size
    }
}

impl DefaultSize for ChunkableDefault {
    fn size(&self) -> u32 {
        self.size
    }
}

/// How one declared parameter reads the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<D> {
    qualifier: Option<String>,
    defaults: Option<D>,
}

impl<D> Default for Binding<D> {
    fn default() -> Self {
        Self {
            qualifier: None,
            defaults: None,
        }
    }
}

impl<D> Binding<D> {
    pub fn unqualified() -> Self {
        Self::default()
    }

    pub fn qualified(qualifier: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            defaults: None,
        }
    }

    pub fn with_defaults(mut self, defaults: D) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn defaults(&self) -> Option<&D> {
        self.defaults.as_ref()
    }
}

impl<D: Validate + DefaultSize> Binding<D> {
    pub(crate) fn checked_defaults(&self) -> Result<Option<&D>, ConfigError> {
        match &self.defaults {
            Some(defaults) => {
                if defaults.validate().is_err() {
                    return Err(ConfigError::InvalidDefaultSize(defaults.size()));
                }
                Ok(Some(defaults))
            }
            None => Ok(None),
        }
    }
}

pub type SliceableBinding = Binding<SliceableDefault>;
pub type ChunkableBinding = Binding<ChunkableDefault>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredParameter {
    Sliceable(SliceableBinding),
    Chunkable(ChunkableBinding),
    /// Anything the pagination resolvers do not handle.
    Other,
}

impl DeclaredParameter {
    fn pagination_qualifier(&self) -> Option<Option<&str>> {
        match self {
            Self::Sliceable(b) => Some(b.qualifier()),
            Self::Chunkable(b) => Some(b.qualifier()),
            Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    name: String,
    parameters: Vec<DeclaredParameter>,
}

impl Endpoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn sliceable(mut self, binding: SliceableBinding) -> Self {
        self.parameters.push(DeclaredParameter::Sliceable(binding));
        self
    }

    pub fn chunkable(mut self, binding: ChunkableBinding) -> Self {
        self.parameters.push(DeclaredParameter::Chunkable(binding));
        self
    }

    pub fn other(mut self) -> Self {
        self.parameters.push(DeclaredParameter::Other);
        self
    }

    /// Declares and checks the endpoint in one go.
    pub fn register(self) -> Result<Self, ConfigError> {
        self.assert_uniqueness()?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[DeclaredParameter] {
        &self.parameters
    }

    pub fn parameter(&self, position: usize) -> Option<&DeclaredParameter> {
        self.parameters.get(position)
    }

    /// Fails when more than one pagination parameter is declared and any of them is
    /// unqualified, or two of them share a qualifier.
    pub fn assert_uniqueness(&self) -> Result<(), ConfigError> {
        let qualifiers: Vec<Option<&str>> = self
            .parameters
            .iter()
            .filter_map(DeclaredParameter::pagination_qualifier)
            .collect();
        if qualifiers.len() < 2 {
            return Ok(());
        }
        let mut seen = HashSet::new();
        for qualifier in qualifiers {
            let Some(qualifier) = qualifier else {
                error!(endpoint = %self.name, "ambiguous pagination parameters");
                return Err(ConfigError::Ambiguous(self.name.clone()));
            };
            if !seen.insert(qualifier) {
                error!(
                    endpoint = %self.name,
                    qualifier = qualifier,
                    "duplicated pagination qualifier"
                );
                return Err(ConfigError::DuplicateQualifier {
                    endpoint: self.name.clone(),
                    qualifier: qualifier.to_owned(),
                });
            }
        }
        Ok(())
    }
}
