//! Event types
//!
//! Pointer events delivered to a widget's surface, and the document-level
//! click targets used for outside-click detection.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a mounted widget instance
pub type InstanceId = u64;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Allocate a fresh instance id (never 0)
pub fn next_instance_id() -> InstanceId {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

/// Which pointer button produced an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    Other(u8),
}

impl PointerButton {
    /// Map a platform button index (0 = primary, 1 = auxiliary, 2 = secondary)
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            n => PointerButton::Other(n),
        }
    }
}

/// Input device that produced an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Pointer event kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Leave,
    Cancel,
}

/// A pointer event on the widget surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub button: PointerButton,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse_down(button: PointerButton) -> Self {
        Self {
            kind: PointerKind::Down,
            button,
            source: PointerSource::Mouse,
        }
    }

    pub fn mouse_up() -> Self {
        Self {
            kind: PointerKind::Up,
            button: PointerButton::Primary,
            source: PointerSource::Mouse,
        }
    }

    pub fn mouse_leave() -> Self {
        Self {
            kind: PointerKind::Leave,
            button: PointerButton::Primary,
            source: PointerSource::Mouse,
        }
    }

    pub fn touch_start() -> Self {
        Self {
            kind: PointerKind::Down,
            button: PointerButton::Primary,
            source: PointerSource::Touch,
        }
    }

    pub fn touch_end() -> Self {
        Self {
            kind: PointerKind::Up,
            button: PointerButton::Primary,
            source: PointerSource::Touch,
        }
    }

    pub fn touch_cancel() -> Self {
        Self {
            kind: PointerKind::Cancel,
            button: PointerButton::Primary,
            source: PointerSource::Touch,
        }
    }

    /// Whether this event starts a press.
    ///
    /// Touches always count; mouse presses only with the primary button.
    pub fn is_press_start(&self) -> bool {
        self.kind == PointerKind::Down
            && (self.source == PointerSource::Touch || self.button == PointerButton::Primary)
    }

    /// Whether this event ends a press (up, leave or cancel)
    pub fn is_press_end(&self) -> bool {
        self.kind != PointerKind::Down
    }
}

/// Exposed sub-parts of a widget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The outer container (primary surface)
    Widget,
    /// The floating settings panel
    Menu,
}

impl Part {
    /// Part name used for external styling
    pub const fn name(&self) -> &'static str {
        match self {
            Part::Widget => "widget",
            Part::Menu => "menu",
        }
    }
}

/// Where a document-level click landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickTarget {
    /// Owning widget instance, `None` for anything outside every widget
    pub instance: Option<InstanceId>,
    pub part: Option<Part>,
}

impl ClickTarget {
    /// A click that landed on no widget at all
    pub fn outside() -> Self {
        Self {
            instance: None,
            part: None,
        }
    }

    /// A click on a part of a specific widget
    pub fn on(instance: InstanceId, part: Part) -> Self {
        Self {
            instance: Some(instance),
            part: Some(part),
        }
    }

    /// Whether the click landed on `instance`'s surface or its menu panel
    pub fn is_inside(&self, instance: InstanceId) -> bool {
        self.instance == Some(instance) && self.part.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_primary_mouse_button_starts_press() {
        assert!(PointerEvent::mouse_down(PointerButton::Primary).is_press_start());
        assert!(!PointerEvent::mouse_down(PointerButton::Secondary).is_press_start());
        assert!(!PointerEvent::mouse_down(PointerButton::from_index(1)).is_press_start());
        assert!(PointerEvent::touch_start().is_press_start());
    }

    #[test]
    fn test_press_end_kinds() {
        assert!(PointerEvent::mouse_up().is_press_end());
        assert!(PointerEvent::mouse_leave().is_press_end());
        assert!(PointerEvent::touch_cancel().is_press_end());
        assert!(!PointerEvent::touch_start().is_press_end());
    }

    #[test]
    fn test_click_containment() {
        let a = next_instance_id();
        let b = next_instance_id();
        assert_ne!(a, b);

        assert!(ClickTarget::on(a, Part::Menu).is_inside(a));
        assert!(ClickTarget::on(a, Part::Widget).is_inside(a));
        assert!(!ClickTarget::on(b, Part::Widget).is_inside(a));
        assert!(!ClickTarget::outside().is_inside(a));
    }
}
