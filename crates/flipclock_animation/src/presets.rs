//! Preset tracks used by the clock face

use crate::easing::Easing;
use crate::keyframe::{Keyframe, KeyframeTrack};
use std::time::Duration;

/// Length of the activation ring pulse
pub const ACTIVATION_PULSE: Duration = Duration::from_millis(1500);

/// Period of the hour/minute separator blink
pub const SEPARATOR_BLINK: Duration = Duration::from_millis(1200);

/// Ring scale while pulsing: 0.8 growing to 1.1
pub fn activation_ring_scale() -> KeyframeTrack {
    KeyframeTrack::new(
        ACTIVATION_PULSE,
        vec![
            Keyframe::new(0.0, 0.8, Easing::CSS_EASE_OUT),
            Keyframe::new(1.0, 1.1, Easing::CSS_EASE_OUT),
        ],
    )
}

/// Ring opacity while pulsing: fades in to full at the midpoint, then out
pub fn activation_ring_opacity() -> KeyframeTrack {
    KeyframeTrack::new(
        ACTIVATION_PULSE,
        vec![
            Keyframe::new(0.0, 0.0, Easing::CSS_EASE_OUT),
            Keyframe::new(0.5, 1.0, Easing::CSS_EASE_OUT),
            Keyframe::new(1.0, 0.0, Easing::CSS_EASE_OUT),
        ],
    )
}

/// Separator opacity: invisible at the half period
pub fn separator_blink() -> KeyframeTrack {
    KeyframeTrack::new(
        SEPARATOR_BLINK,
        vec![
            Keyframe::new(0.0, 1.0, Easing::CSS_EASE),
            Keyframe::new(0.5, 0.0, Easing::CSS_EASE),
            Keyframe::new(1.0, 1.0, Easing::CSS_EASE),
        ],
    )
    .looping()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_pulse_shape() {
        let opacity = activation_ring_opacity();
        let scale = activation_ring_scale();

        assert_eq!(opacity.sample(Duration::ZERO), 0.0);
        assert_eq!(opacity.sample(Duration::from_millis(750)), 1.0);
        assert_eq!(opacity.sample(ACTIVATION_PULSE), 0.0);

        assert!((scale.sample(Duration::ZERO) - 0.8).abs() < 1e-6);
        assert!((scale.sample(ACTIVATION_PULSE) - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_separator_blinks_every_period() {
        let blink = separator_blink();
        assert_eq!(blink.sample(Duration::ZERO), 1.0);
        assert_eq!(blink.sample(Duration::from_millis(600)), 0.0);
        assert_eq!(blink.sample(Duration::from_millis(1800)), 0.0);
        assert!(blink.sample(Duration::from_millis(1100)) > 0.5);
    }
}
