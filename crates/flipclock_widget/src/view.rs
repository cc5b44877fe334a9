//! Render snapshots
//!
//! A [`ClockView`] is everything a rendering layer needs to paint one widget
//! instance at one point in virtual time. The palette travels with the view,
//! so instances never share theme state.

use crate::display_time::Greeting;
use flipclock_animation::{presets, CellView};
use flipclock_core::{ColorScheme, Part};
use flipclock_theme::{Metrics, Palette, SizeMode, ThemeMode};
use std::time::Duration;

/// Activation ring cue
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingView {
    pub active: bool,
    pub scale: f32,
    pub opacity: f32,
}

impl RingView {
    pub fn hidden() -> Self {
        Self {
            active: false,
            scale: 0.8,
            opacity: 0.0,
        }
    }

    /// Ring `elapsed` after activation: pulse, then rest at full size
    pub fn active(elapsed: Duration) -> Self {
        if elapsed >= presets::ACTIVATION_PULSE {
            return Self {
                active: true,
                scale: 1.0,
                opacity: 1.0,
            };
        }
        Self {
            active: true,
            scale: presets::activation_ring_scale().sample(elapsed),
            opacity: presets::activation_ring_opacity().sample(elapsed),
        }
    }
}

/// Settings menu state and the selections its controls show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuView {
    pub open: bool,
    pub size: SizeMode,
    pub theme: ThemeMode,
}

/// Date and greeting line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateLine {
    pub date_label: String,
    pub greeting: Greeting,
}

impl DateLine {
    pub fn text(&self) -> String {
        format!("{} · {}", self.greeting.label(), self.date_label)
    }
}

/// Snapshot of one widget instance
#[derive(Clone, Debug, PartialEq)]
pub struct ClockView {
    pub hour: CellView,
    pub minute: CellView,
    /// Opacity of the hour/minute separator
    pub separator_opacity: f32,
    pub date_line: Option<DateLine>,
    pub ring: RingView,
    pub menu: MenuView,
    pub scheme: ColorScheme,
    pub palette: Palette,
    pub metrics: Metrics,
    /// Names of the exposed styling parts
    pub parts: [&'static str; 2],
}

impl ClockView {
    pub const PARTS: [&'static str; 2] = [Part::Widget.name(), Part::Menu.name()];

    /// "H:MM" using each cell's settled text
    pub fn time_text(&self) -> String {
        format!("{}:{}", self.hour.text(), self.minute.text())
    }

    pub fn separator_visible(&self) -> bool {
        self.separator_opacity >= 0.5
    }
}
