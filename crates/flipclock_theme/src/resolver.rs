//! Theme resolution
//!
//! A [`ThemeResolver`] turns a [`ThemeMode`] plus the host's system preference
//! into a concrete [`ColorScheme`] and [`Palette`]. In `auto` mode it holds a
//! receiver on the host's scheme channel and re-resolves whenever the value
//! changes. The receiver exists only while the resolver is attached and in
//! `auto` mode.

use crate::mode::ThemeMode;
use crate::palette::Palette;
use flipclock_core::{ColorScheme, HostSignals};
use tokio::sync::watch;

/// Whether `mode` resolves to dark given the current system preference
pub fn is_dark(mode: ThemeMode, system: ColorScheme) -> bool {
    match mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::Auto => system.is_dark(),
    }
}

/// Resolves the effective color scheme of one widget instance
#[derive(Debug)]
pub struct ThemeResolver {
    mode: ThemeMode,
    scheme: ColorScheme,
    palette: Palette,
    watch: Option<watch::Receiver<ColorScheme>>,
    attached: bool,
}

impl ThemeResolver {
    pub fn new(mode: ThemeMode) -> Self {
        let scheme = ColorScheme::from_dark(is_dark(mode, ColorScheme::Light));
        Self {
            mode,
            scheme,
            palette: Palette::for_scheme(scheme),
            watch: None,
            attached: false,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Whether a system preference subscription is currently held
    pub fn is_subscribed(&self) -> bool {
        self.watch.is_some()
    }

    /// Start following host signals and resolve against the current preference
    pub fn attach(&mut self, signals: &HostSignals) {
        self.attached = true;
        self.sync_subscription(signals);
        self.resolve(signals.system_scheme());
    }

    /// Stop following host signals, releasing any subscription
    pub fn detach(&mut self) {
        self.attached = false;
        if self.watch.take().is_some() {
            tracing::trace!("released system scheme subscription");
        }
    }

    /// Change the requested mode. Returns whether the resolved scheme changed.
    pub fn set_mode(&mut self, mode: ThemeMode, signals: &HostSignals) -> bool {
        self.mode = mode;
        if self.attached {
            self.sync_subscription(signals);
        }
        self.resolve(signals.system_scheme())
    }

    /// Pick up a pending system preference change.
    ///
    /// Returns whether the resolved scheme changed.
    pub fn poll(&mut self, signals: &HostSignals) -> bool {
        let Some(rx) = self.watch.as_mut() else {
            return false;
        };
        match rx.has_changed() {
            Ok(false) => false,
            Ok(true) => {
                let system = *rx.borrow_and_update();
                self.resolve(system)
            }
            Err(_) => {
                tracing::warn!("system scheme channel closed, resubscribing");
                self.watch = None;
                self.sync_subscription(signals);
                self.resolve(signals.system_scheme())
            }
        }
    }

    fn sync_subscription(&mut self, signals: &HostSignals) {
        let wanted = self.attached && self.mode == ThemeMode::Auto;
        match (wanted, self.watch.is_some()) {
            (true, false) => {
                let mut rx = signals.subscribe_scheme();
                rx.borrow_and_update();
                self.watch = Some(rx);
                tracing::trace!("subscribed to system scheme");
            }
            (false, true) => {
                self.watch = None;
                tracing::trace!("released system scheme subscription");
            }
            _ => {}
        }
    }

    fn resolve(&mut self, system: ColorScheme) -> bool {
        let scheme = ColorScheme::from_dark(is_dark(self.mode, system));
        if scheme == self.scheme {
            return false;
        }
        tracing::debug!(mode = %self.mode, "theme resolved to {:?}", scheme);
        self.scheme = scheme;
        self.palette = Palette::for_scheme(scheme);
        true
    }
}

impl Default for ThemeResolver {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes_ignore_system() {
        for system in [ColorScheme::Light, ColorScheme::Dark] {
            assert!(!is_dark(ThemeMode::Light, system));
            assert!(is_dark(ThemeMode::Dark, system));
        }
        assert!(is_dark(ThemeMode::Auto, ColorScheme::Dark));
        assert!(!is_dark(ThemeMode::Auto, ColorScheme::Light));
    }

    #[test]
    fn test_auto_follows_system_changes() {
        let signals = HostSignals::new(ColorScheme::Light);
        let mut resolver = ThemeResolver::new(ThemeMode::Auto);
        resolver.attach(&signals);
        assert!(!resolver.is_dark());
        assert!(!resolver.poll(&signals));

        signals.set_system_scheme(ColorScheme::Dark);
        assert!(resolver.poll(&signals));
        assert!(resolver.is_dark());
        assert_eq!(resolver.palette(), &Palette::dark());
    }

    #[test]
    fn test_subscription_only_while_auto_and_attached() {
        let signals = HostSignals::new(ColorScheme::Dark);
        let mut resolver = ThemeResolver::new(ThemeMode::Light);

        resolver.attach(&signals);
        assert!(!resolver.is_subscribed());
        assert_eq!(signals.scheme_subscribers(), 0);

        assert!(resolver.set_mode(ThemeMode::Auto, &signals));
        assert!(resolver.is_subscribed());
        assert_eq!(signals.scheme_subscribers(), 1);

        resolver.set_mode(ThemeMode::Dark, &signals);
        assert_eq!(signals.scheme_subscribers(), 0);

        resolver.set_mode(ThemeMode::Auto, &signals);
        resolver.detach();
        assert_eq!(signals.scheme_subscribers(), 0);
    }

    #[test]
    fn test_explicit_mode_does_not_react() {
        let signals = HostSignals::new(ColorScheme::Light);
        let mut resolver = ThemeResolver::new(ThemeMode::Light);
        resolver.attach(&signals);
        signals.set_system_scheme(ColorScheme::Dark);
        assert!(!resolver.poll(&signals));
        assert!(!resolver.is_dark());
    }

    #[test]
    fn test_detached_resolver_still_resolves_mode() {
        let signals = HostSignals::new(ColorScheme::Dark);
        let mut resolver = ThemeResolver::new(ThemeMode::Light);
        assert!(resolver.set_mode(ThemeMode::Dark, &signals));
        assert!(!resolver.is_subscribed());
    }
}
