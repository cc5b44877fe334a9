//! Theme and size modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A mode string that matches no known value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} mode: {value:?}")]
pub struct ParseModeError {
    pub kind: &'static str,
    pub value: String,
}

/// Requested theme mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Auto];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }

    /// Parse, falling back to the default for unknown values
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for ThemeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            _ => Err(ParseModeError {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested widget size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeMode {
    pub const ALL: [SizeMode; 3] = [SizeMode::Small, SizeMode::Medium, SizeMode::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeMode::Small => "small",
            SizeMode::Medium => "medium",
            SizeMode::Large => "large",
        }
    }

    /// Parse, falling back to the default for unknown values
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for SizeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(SizeMode::Small),
            "medium" => Ok(SizeMode::Medium),
            "large" => Ok(SizeMode::Large),
            _ => Err(ParseModeError {
                kind: "size",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
