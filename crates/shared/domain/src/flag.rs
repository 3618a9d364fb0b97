use crate::constants::{BOOL, NUMBER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of a flag. A flag never changes kind after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    Bool,
    Number,
}

impl FlagKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => BOOL,
            Self::Number => NUMBER,
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a flag.
///
/// Serialized untagged, so `true` and `4` in JSON or TOML map directly onto it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(f64),
}

impl FlagValue {
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        match self {
            Self::Bool(_) => FlagKind::Bool,
            Self::Number(_) => FlagKind::Number,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Number(_) => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Bool(_) => None,
        }
    }

    /// Reads a textual value: `true`/`false` become booleans, finite numbers become numbers.
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "true" => Some(Self::Bool(true)),
            "false" => Some(Self::Bool(false)),
            other => other.parse::<f64>().ok().filter(|v| v.is_finite()).map(Self::Number),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FlagValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for FlagValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for FlagValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

// Hardware limits fit well within f64's exact integer range.
#[allow(clippy::cast_precision_loss)]
impl From<u64> for FlagValue {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}
