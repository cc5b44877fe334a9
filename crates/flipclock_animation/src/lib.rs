//! Flipclock Animation System
//!
//! Easing curves, keyframe tracks and the digit flip animator.
//!
//! # Features
//!
//! - **Easing**: CSS-compatible cubic bezier curves
//! - **Keyframe tracks**: stateless sampling by elapsed time, optionally looping
//! - **Flip animator**: two-phase card flips per display cell, guarded by
//!   per-cell generation counters so a superseded flip can never commit

pub mod easing;
pub mod flip;
pub mod keyframe;
pub mod presets;

pub use easing::Easing;
pub use flip::{CellId, CellView, FlipAnimator, FlipTimer};
pub use keyframe::{Keyframe, KeyframeTrack};
