//! Widget configuration (flipclock.toml)

use crate::gesture::GestureTiming;
use flipclock_theme::ScaleProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level widget configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WidgetConfig {
    /// Size scale table
    #[serde(default)]
    pub scale_profile: ScaleProfile,
    /// Render the date and greeting line
    #[serde(default = "default_true")]
    pub show_date_line: bool,
    #[serde(default)]
    pub timing: TimingConfig,
    /// Attributes applied before mount
    #[serde(default)]
    pub attributes: AttributeConfig,
}

fn default_true() -> bool {
    true
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            scale_profile: ScaleProfile::default(),
            show_date_line: true,
            timing: TimingConfig::default(),
            attributes: AttributeConfig::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Timer settings, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimingConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_menu_delay_ms")]
    pub menu_delay_ms: u64,
    #[serde(default = "default_flip_ms")]
    pub flip_ms: u64,
    #[serde(default = "default_haptic_ms")]
    pub haptic_ms: u64,
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_hold_ms() -> u64 {
    1500
}

fn default_menu_delay_ms() -> u64 {
    300
}

fn default_flip_ms() -> u64 {
    400
}

fn default_haptic_ms() -> u64 {
    50
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            hold_ms: default_hold_ms(),
            menu_delay_ms: default_menu_delay_ms(),
            flip_ms: default_flip_ms(),
            haptic_ms: default_haptic_ms(),
        }
    }
}

impl TimingConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn flip(&self) -> Duration {
        Duration::from_millis(self.flip_ms)
    }

    pub fn gesture(&self) -> GestureTiming {
        GestureTiming {
            hold: Duration::from_millis(self.hold_ms),
            menu_delay: Duration::from_millis(self.menu_delay_ms),
            haptic: Duration::from_millis(self.haptic_ms),
        }
    }
}

/// Initial attribute values. Kept as raw strings so invalid values take the
/// same fallback path as attributes written at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttributeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = WidgetConfig::from_toml_str("").unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.timing.tick(), Duration::from_secs(1));
        assert_eq!(config.timing.gesture(), GestureTiming::default());
    }

    #[test]
    fn test_full_config() {
        let config = WidgetConfig::from_toml_str(
            r#"
            scale_profile = "soft"
            show_date_line = false

            [timing]
            hold_ms = 800

            [attributes]
            size = "large"
            theme = "dark"
            "#,
        )
        .unwrap();
        assert_eq!(config.scale_profile, ScaleProfile::Soft);
        assert!(!config.show_date_line);
        assert_eq!(config.timing.hold_ms, 800);
        assert_eq!(config.timing.flip_ms, 400);
        assert_eq!(config.attributes.size.as_deref(), Some("large"));
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let err = WidgetConfig::from_toml_str("scale_profile = \"huge\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = WidgetConfig::from_path(Path::new("/nonexistent/flipclock.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
