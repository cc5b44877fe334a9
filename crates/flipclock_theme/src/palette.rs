//! Color palettes

use flipclock_core::{Color, ColorScheme};

/// The small fixed palette the clock face is painted with
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Widget and menu background
    pub surface: Color,
    /// Digits and menu labels
    pub on_surface: Color,
    /// Secondary text (date and greeting line)
    pub on_surface_variant: Color,
    /// Accent: activation ring and menu selections
    pub primary: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            surface: Color::from_hex(0xF8F9FA),
            on_surface: Color::from_hex(0x1C1B1F),
            on_surface_variant: Color::from_hex(0x49454F),
            primary: Color::from_hex(0x6750A4),
        }
    }

    pub fn dark() -> Self {
        Self {
            surface: Color::from_hex(0x1C1B1F),
            on_surface: Color::from_hex(0xE6E1E5),
            on_surface_variant: Color::from_hex(0xCAC4D0),
            primary: Color::from_hex(0x6750A4),
        }
    }

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark => Self::dark(),
        }
    }

    /// Presentation properties as (name, value) pairs.
    ///
    /// Names match the custom properties the face stylesheet consumes.
    pub fn properties(&self) -> [(&'static str, String); 4] {
        [
            ("--sfc", self.surface.to_css()),
            ("--txt", self.on_surface.to_css()),
            ("--txt-variant", self.on_surface_variant.to_css()),
            ("--accent", self.primary.to_css()),
        ]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}
