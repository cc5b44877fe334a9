//! Flipclock Widget
//!
//! A self-contained flip-digit clock component:
//!
//! - **Ticker**: samples the wall clock every second and flips changed digits
//! - **Long press**: holding the primary pointer for 1.5 s shows the
//!   activation ring, then opens the settings menu
//! - **Settings menu**: size and theme selections written back as attributes;
//!   outside clicks close it
//! - **Theme**: `light`, `dark` or `auto`, following the host's system scheme
//!
//! The widget is driven entirely through virtual time. Hosts feed input
//! events, call [`ClockWidget::advance`] and render [`ClockWidget::view`].
//!
//! # Example
//!
//! ```rust
//! use flipclock_core::{HostSignals, ManualClock, PointerButton, PointerEvent};
//! use flipclock_widget::{ClockWidget, WidgetConfig};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = ManualClock::at_time(9, 5, 0);
//! let mut widget = ClockWidget::new(
//!     WidgetConfig::default(),
//!     Arc::new(clock.clone()),
//!     HostSignals::default(),
//! );
//! widget.mount();
//! assert_eq!(widget.view().time_text(), "9:05");
//!
//! widget.pointer(PointerEvent::mouse_down(PointerButton::Primary));
//! widget.advance(Duration::from_millis(1800));
//! assert!(widget.menu_open());
//! ```

pub mod attributes;
pub mod config;
pub mod display_time;
pub mod gesture;
pub mod menu;
pub mod ticker;
pub mod view;
pub mod widget;

pub use attributes::{AttributeError, AttributeName, Attributes, PreferenceState};
pub use config::{AttributeConfig, ConfigError, TimingConfig, WidgetConfig};
pub use display_time::{DisplayTime, Greeting};
pub use gesture::{GestureTiming, LongPressDetector, PressPhase};
pub use menu::{MenuController, MenuSelection};
pub use ticker::Ticker;
pub use view::{ClockView, DateLine, MenuView, RingView};
pub use widget::{ClockWidget, Notification, WidgetTimer};
