//! Attribute surface
//!
//! The widget's only externally settable state is a pair of string
//! attributes. Values are stored verbatim, exactly as the host wrote them, and
//! interpreted on every read. Invalid values fall back to the documented
//! defaults.

use flipclock_theme::{ParseModeError, SizeMode, ThemeMode};
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Attribute errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("unknown attribute: {0:?}")]
    UnknownAttribute(String),

    #[error("invalid value {value:?} for attribute `{name}`")]
    InvalidValue { name: &'static str, value: String },
}

impl From<ParseModeError> for AttributeError {
    fn from(err: ParseModeError) -> Self {
        AttributeError::InvalidValue {
            name: err.kind,
            value: err.value,
        }
    }
}

/// Observed attribute names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeName {
    Size,
    Theme,
}

impl AttributeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeName::Size => "size",
            AttributeName::Theme => "theme",
        }
    }
}

impl FromStr for AttributeName {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "size" => Ok(AttributeName::Size),
            "theme" => Ok(AttributeName::Theme),
            other => Err(AttributeError::UnknownAttribute(other.to_string())),
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size and theme as currently requested through attributes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreferenceState {
    pub size: SizeMode,
    pub theme: ThemeMode,
}

/// Raw attribute storage
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    values: FxHashMap<AttributeName, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: AttributeName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    /// Write an attribute. Returns whether the stored value changed.
    pub fn set(&mut self, name: AttributeName, value: &str) -> bool {
        if self.get(name) == Some(value) {
            return false;
        }
        self.values.insert(name, value.to_string());
        true
    }

    /// Remove an attribute, returning its previous value
    pub fn remove(&mut self, name: AttributeName) -> Option<String> {
        self.values.remove(&name)
    }

    /// Strictly parse the `size` attribute. Absent means the default.
    pub fn size(&self) -> Result<SizeMode, AttributeError> {
        match self.get(AttributeName::Size) {
            Some(value) => Ok(value.parse()?),
            None => Ok(SizeMode::default()),
        }
    }

    /// Strictly parse the `theme` attribute. Absent means the default.
    pub fn theme(&self) -> Result<ThemeMode, AttributeError> {
        match self.get(AttributeName::Theme) {
            Some(value) => Ok(value.parse()?),
            None => Ok(ThemeMode::default()),
        }
    }

    /// Strictly check one attribute's stored value
    pub fn validate(&self, name: AttributeName) -> Result<(), AttributeError> {
        match name {
            AttributeName::Size => self.size().map(drop),
            AttributeName::Theme => self.theme().map(drop),
        }
    }

    /// Current preferences, substituting defaults for invalid values
    pub fn preferences(&self) -> PreferenceState {
        PreferenceState {
            size: self.size().unwrap_or_default(),
            theme: self.theme().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let attrs = Attributes::new();
        assert_eq!(attrs.preferences(), PreferenceState::default());
        assert_eq!(attrs.preferences().size, SizeMode::Medium);
        assert_eq!(attrs.preferences().theme, ThemeMode::Auto);
    }

    #[test]
    fn test_invalid_value_falls_back_but_is_kept() {
        let mut attrs = Attributes::new();
        attrs.set(AttributeName::Size, "enormous");
        assert_eq!(
            attrs.size(),
            Err(AttributeError::InvalidValue {
                name: "size",
                value: "enormous".to_string()
            })
        );
        assert_eq!(attrs.preferences().size, SizeMode::Medium);
        assert_eq!(attrs.get(AttributeName::Size), Some("enormous"));
        assert!(attrs.validate(AttributeName::Theme).is_ok());
    }

    #[test]
    fn test_set_reports_changes() {
        let mut attrs = Attributes::new();
        assert!(attrs.set(AttributeName::Theme, "dark"));
        assert!(!attrs.set(AttributeName::Theme, "dark"));
        assert_eq!(attrs.preferences().theme, ThemeMode::Dark);
        assert_eq!(attrs.remove(AttributeName::Theme).as_deref(), Some("dark"));
        assert_eq!(attrs.preferences().theme, ThemeMode::Auto);
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!("size".parse::<AttributeName>(), Ok(AttributeName::Size));
        assert_eq!(
            "color".parse::<AttributeName>(),
            Err(AttributeError::UnknownAttribute("color".to_string()))
        );
    }
}
