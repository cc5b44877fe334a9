//! Host signals
//!
//! External collaborators a widget subscribes to while mounted:
//!
//! - the system color-scheme preference (`tokio::sync::watch`: current value
//!   plus change notification)
//! - document-level clicks used for outside-click detection
//!   (`tokio::sync::broadcast`)
//! - an optional haptic feedback sink
//!
//! Subscriptions are the channel receivers themselves. Dropping a receiver
//! releases the listener; the `*_subscribers` counts make leaks observable.

use crate::events::ClickTarget;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// Capacity of the document click channel
const CLICK_CAPACITY: usize = 64;

/// Light or dark color scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

/// Sink for short haptic pulses
pub trait HapticSink: Send + Sync {
    fn pulse(&self, duration: Duration);
}

/// Signals shared between a host and the widgets it embeds
#[derive(Clone)]
pub struct HostSignals {
    scheme: Arc<watch::Sender<ColorScheme>>,
    clicks: broadcast::Sender<ClickTarget>,
    haptics: Option<Arc<dyn HapticSink>>,
}

impl HostSignals {
    pub fn new(system_scheme: ColorScheme) -> Self {
        let (scheme, _) = watch::channel(system_scheme);
        let (clicks, _) = broadcast::channel(CLICK_CAPACITY);
        Self {
            scheme: Arc::new(scheme),
            clicks,
            haptics: None,
        }
    }

    /// Attach a haptic feedback sink
    pub fn with_haptics(mut self, sink: Arc<dyn HapticSink>) -> Self {
        self.haptics = Some(sink);
        self
    }

    // ========== Color Scheme ==========

    /// Current system color-scheme preference
    pub fn system_scheme(&self) -> ColorScheme {
        *self.scheme.borrow()
    }

    /// Update the system preference, notifying subscribers on change
    pub fn set_system_scheme(&self, scheme: ColorScheme) {
        let changed = self.scheme.send_if_modified(|current| {
            if *current == scheme {
                false
            } else {
                *current = scheme;
                true
            }
        });
        if changed {
            tracing::debug!("system color scheme is now {:?}", scheme);
        }
    }

    /// Subscribe to preference changes
    pub fn subscribe_scheme(&self) -> watch::Receiver<ColorScheme> {
        self.scheme.subscribe()
    }

    /// Number of live preference subscriptions
    pub fn scheme_subscribers(&self) -> usize {
        self.scheme.receiver_count()
    }

    // ========== Document Clicks ==========

    /// Deliver a document-level click to every subscribed widget
    pub fn click(&self, target: ClickTarget) {
        if self.clicks.send(target).is_err() {
            tracing::trace!("document click with no listeners");
        }
    }

    /// Subscribe to document-level clicks
    pub fn subscribe_clicks(&self) -> broadcast::Receiver<ClickTarget> {
        self.clicks.subscribe()
    }

    /// Number of live click subscriptions
    pub fn click_subscribers(&self) -> usize {
        self.clicks.receiver_count()
    }

    // ========== Haptics ==========

    /// The haptic sink, if the host supports one
    pub fn haptics(&self) -> Option<&Arc<dyn HapticSink>> {
        self.haptics.as_ref()
    }
}

impl Default for HostSignals {
    fn default() -> Self {
        Self::new(ColorScheme::Light)
    }
}

impl fmt::Debug for HostSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostSignals")
            .field("system_scheme", &self.system_scheme())
            .field("scheme_subscribers", &self.scheme_subscribers())
            .field("click_subscribers", &self.click_subscribers())
            .field("haptics", &self.haptics.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Part;

    #[test]
    fn test_scheme_change_notifies_subscriber() {
        let signals = HostSignals::new(ColorScheme::Light);
        let mut rx = signals.subscribe_scheme();
        assert!(!rx.has_changed().unwrap());

        signals.set_system_scheme(ColorScheme::Dark);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ColorScheme::Dark);

        // Same value again is not a change
        signals.set_system_scheme(ColorScheme::Dark);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_dropping_receivers_releases_subscriptions() {
        let signals = HostSignals::default();
        let scheme_rx = signals.subscribe_scheme();
        let click_rx = signals.subscribe_clicks();
        assert_eq!(signals.scheme_subscribers(), 1);
        assert_eq!(signals.click_subscribers(), 1);

        drop(scheme_rx);
        drop(click_rx);
        assert_eq!(signals.scheme_subscribers(), 0);
        assert_eq!(signals.click_subscribers(), 0);
    }

    #[test]
    fn test_clicks_broadcast_to_all() {
        let signals = HostSignals::default();
        let mut a = signals.subscribe_clicks();
        let mut b = signals.subscribe_clicks();

        signals.click(ClickTarget::on(7, Part::Menu));
        assert_eq!(a.try_recv().unwrap(), ClickTarget::on(7, Part::Menu));
        assert_eq!(b.try_recv().unwrap(), ClickTarget::on(7, Part::Menu));
    }

    #[test]
    fn test_click_without_listeners_is_harmless() {
        let signals = HostSignals::default();
        signals.click(ClickTarget::outside());
    }
}
