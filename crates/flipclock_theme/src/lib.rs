//! Flipclock Theme System
//!
//! Resolves the widget's requested theme mode into a concrete palette and its
//! size mode into scaled metrics.
//!
//! # Overview
//!
//! - **Modes**: [`ThemeMode`] (`light`, `dark`, `auto`) and [`SizeMode`]
//!   (`small`, `medium`, `large`), parsed from attribute strings
//! - **Palettes**: a fixed four-color [`Palette`] per color scheme
//! - **Scale profiles**: two size tables, [`ScaleProfile::Classic`]
//!   (0.7 / 1.0 / 1.4) and [`ScaleProfile::Soft`] (0.8 / 1.0 / 1.3)
//! - **Resolver**: [`ThemeResolver`] follows the system color-scheme signal
//!   while in `auto` mode, holding the subscription only as long as it is
//!   needed
//!
//! Palettes are owned per widget instance and handed to the renderer through
//! the view snapshot; nothing is written to shared global state.
//!
//! # Quick Start
//!
//! ```rust
//! use flipclock_core::{ColorScheme, HostSignals};
//! use flipclock_theme::{ThemeMode, ThemeResolver};
//!
//! let signals = HostSignals::new(ColorScheme::Dark);
//! let mut resolver = ThemeResolver::new(ThemeMode::Auto);
//! resolver.attach(&signals);
//! assert!(resolver.is_dark());
//!
//! signals.set_system_scheme(ColorScheme::Light);
//! assert!(resolver.poll(&signals));
//! assert!(!resolver.is_dark());
//! ```

pub mod mode;
pub mod palette;
pub mod resolver;
pub mod scale;

pub use mode::{ParseModeError, SizeMode, ThemeMode};
pub use palette::Palette;
pub use resolver::ThemeResolver;
pub use scale::{Metrics, ScaleProfile};
