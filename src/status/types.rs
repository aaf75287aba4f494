use std::fmt;
use std::str::FromStr;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Caller-facing outcome of a single verification.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Valid,
    Invalid,
    /// The service could not conclude; no opinion either way.
    Undetermined,
}

impl Verdict {
    /// `Some(true)` / `Some(false)` for a definite verdict, `None` otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Valid => Some(true),
            Self::Invalid => Some(false),
            Self::Undetermined => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl From<bool> for Verdict {
    fn from(value: bool) -> Self {
        if value { Self::Valid } else { Self::Invalid }
    }
}

impl From<Option<bool>> for Verdict {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Undetermined, Self::from)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid => f.write_str("invalid"),
            Self::Undetermined => f.write_str("undetermined"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "valid" | "true" => Ok(Self::Valid),
            "invalid" | "false" => Ok(Self::Invalid),
            "undetermined" | "null" | "none" => Ok(Self::Undetermined),
            other => Err(format!(
                "unknown verdict '{other}', use: valid|invalid|undetermined"
            )),
        }
    }
}
