//! Flipclock Core Runtime
//!
//! Foundational primitives shared by every flipclock crate:
//!
//! - **Timer queue**: a virtual, single-threaded queue of delayed, repeating
//!   and next-frame callbacks. Each widget instance owns one.
//! - **State machines**: small typed transition tables for interaction states
//! - **Host signals**: the system color-scheme watch, the document-level click
//!   broadcast and the optional haptic sink
//! - **Wall clocks**: the local system clock and a settable manual clock
//!
//! # Example
//!
//! ```rust
//! use flipclock_core::timer::TimerQueue;
//! use std::time::Duration;
//!
//! let mut queue = TimerQueue::new();
//! queue.schedule(Duration::from_millis(300), "open-menu");
//!
//! queue.advance_to(Duration::from_millis(299));
//! assert!(queue.pop_due().is_none());
//!
//! queue.advance_to(Duration::from_millis(300));
//! assert_eq!(queue.pop_due().map(|(_, p)| p), Some("open-menu"));
//! ```

pub mod clock;
pub mod color;
pub mod events;
pub mod fsm;
pub mod host;
pub mod timer;

pub use clock::{ManualClock, SystemClock, WallClock};
pub use color::Color;
pub use events::{
    next_instance_id, ClickTarget, InstanceId, Part, PointerButton, PointerEvent, PointerKind,
    PointerSource,
};
pub use fsm::{StateMachine, Transition};
pub use host::{ColorScheme, HapticSink, HostSignals};
pub use timer::{TimerId, TimerQueue};
