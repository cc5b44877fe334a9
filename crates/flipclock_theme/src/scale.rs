//! Size scaling

use crate::mode::SizeMode;
use serde::{Deserialize, Serialize};

/// Base padding around the clock face, in pixels
pub const BASE_PADDING: f32 = 20.0;

/// Base digit font size, in pixels
pub const BASE_FONT_SIZE: f32 = 88.0;

/// Base minimum width of the settings menu, in pixels
pub const BASE_MENU_MIN_WIDTH: f32 = 200.0;

/// Table mapping a [`SizeMode`] to a scale factor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleProfile {
    /// 0.7 / 1.0 / 1.4
    #[default]
    Classic,
    /// 0.8 / 1.0 / 1.3
    Soft,
}

impl ScaleProfile {
    pub fn factor(&self, size: SizeMode) -> f32 {
        match (self, size) {
            (_, SizeMode::Medium) => 1.0,
            (ScaleProfile::Classic, SizeMode::Small) => 0.7,
            (ScaleProfile::Classic, SizeMode::Large) => 1.4,
            (ScaleProfile::Soft, SizeMode::Small) => 0.8,
            (ScaleProfile::Soft, SizeMode::Large) => 1.3,
        }
    }

    pub fn metrics(&self, size: SizeMode) -> Metrics {
        Metrics::for_scale(self.factor(size))
    }
}

/// Dimensions of the clock face after scaling
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    pub scale: f32,
    pub padding: f32,
    pub font_size: f32,
    pub menu_min_width: f32,
}

impl Metrics {
    pub fn for_scale(scale: f32) -> Self {
        Self {
            scale,
            padding: BASE_PADDING * scale,
            font_size: BASE_FONT_SIZE * scale,
            menu_min_width: BASE_MENU_MIN_WIDTH * scale,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::for_scale(1.0)
    }
}
