use serde::{Deserialize, Serialize};

pub const ASC: &str = "ASC";
pub const DESC: &str = "DESC";

/// Sort order requested for a slice or a chunk.
///
/// "Unspecified" is modelled as `Option<Direction>::None` by the descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl Direction {
    /// Case-sensitive parse. Absent or unknown input yields `None`.
    pub fn from_optional_str(raw: Option<&str>) -> Option<Self> {
        match raw? {
            ASC => Some(Self::Asc),
            DESC => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => ASC,
            Self::Desc => DESC,
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Asc)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
