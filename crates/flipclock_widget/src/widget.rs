//! The clock widget component
//!
//! `ClockWidget` owns one virtual timer queue and serializes every input onto
//! it: the repeating tick, flip start/commit callbacks, the hold and menu
//! timers, pointer events, menu selections and host signals. Nothing runs
//! concurrently; the host drives the widget by calling [`ClockWidget::advance`].

use crate::attributes::{AttributeName, Attributes, PreferenceState};
use crate::config::WidgetConfig;
use crate::display_time::DisplayTime;
use crate::gesture::{GestureAction, GestureTimer, LongPressDetector, PressPhase};
use crate::menu::{MenuController, MenuSelection};
use crate::ticker::Ticker;
use crate::view::{ClockView, DateLine, MenuView, RingView};
use flipclock_animation::{presets, CellId, FlipAnimator, FlipTimer};
use flipclock_core::{
    next_instance_id, ColorScheme, HostSignals, InstanceId, PointerEvent, TimerQueue, WallClock,
};
use flipclock_theme::{Palette, SizeMode, ThemeMode, ThemeResolver};
use std::sync::Arc;
use std::time::Duration;

/// Timer payloads on the widget's queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetTimer {
    Tick,
    Flip(FlipTimer),
    Gesture(GestureTimer),
}

impl From<FlipTimer> for WidgetTimer {
    fn from(timer: FlipTimer) -> Self {
        WidgetTimer::Flip(timer)
    }
}

impl From<GestureTimer> for WidgetTimer {
    fn from(timer: GestureTimer) -> Self {
        WidgetTimer::Gesture(timer)
    }
}

/// Change notifications a host may observe
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// An attribute was written or removed (`value` is `None` on removal)
    AttributeChanged {
        name: AttributeName,
        value: Option<String>,
    },
    /// The long-press threshold was reached
    Activated,
    MenuOpened,
    MenuClosed,
}

/// A flip clock widget instance
pub struct ClockWidget {
    id: InstanceId,
    config: WidgetConfig,
    clock: Arc<dyn WallClock>,
    signals: HostSignals,
    queue: TimerQueue<WidgetTimer>,
    attributes: Attributes,
    ticker: Ticker,
    animator: FlipAnimator,
    gesture: LongPressDetector,
    menu: MenuController,
    theme: ThemeResolver,
    mounted_at: Option<Duration>,
    notifications: Vec<Notification>,
}

impl ClockWidget {
    pub fn new(config: WidgetConfig, clock: Arc<dyn WallClock>, signals: HostSignals) -> Self {
        let id = next_instance_id();

        let mut attributes = Attributes::new();
        let initial = [
            (AttributeName::Size, config.attributes.size.as_deref()),
            (AttributeName::Theme, config.attributes.theme.as_deref()),
        ];
        for (name, value) in initial {
            if let Some(value) = value {
                attributes.set(name, value);
                if let Err(err) = attributes.validate(name) {
                    tracing::warn!("{err}, using the default");
                }
            }
        }

        let prefs = attributes.preferences();
        let mut theme = ThemeResolver::new(prefs.theme);
        theme.set_mode(prefs.theme, &signals);

        Self {
            id,
            ticker: Ticker::new(config.timing.tick()),
            animator: FlipAnimator::new(config.timing.flip()),
            gesture: LongPressDetector::new(config.timing.gesture()),
            menu: MenuController::new(id),
            config,
            clock,
            signals,
            queue: TimerQueue::new(),
            attributes,
            theme,
            mounted_at: None,
            notifications: Vec::new(),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn signals(&self) -> &HostSignals {
        &self.signals
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    // ========== Lifecycle ==========

    /// Attach to the host: paint the first sample immediately, start ticking
    /// and subscribe to host signals
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        self.mounted_at = Some(self.queue.now());
        self.theme.attach(&self.signals);
        self.menu.attach(&self.signals);
        self.ticker.tick(self.clock.as_ref(), &mut self.animator, &mut self.queue);
        self.ticker.start(&mut self.queue, WidgetTimer::Tick);
        tracing::debug!(instance = self.id, "mounted");
    }

    /// Detach from the host, cancelling every timer and dropping every
    /// subscription. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if self.mounted_at.take().is_none() {
            return;
        }
        self.ticker.stop(&mut self.queue);
        self.animator.settle(&mut self.queue);
        self.gesture.reset(&mut self.queue);
        self.menu.detach();
        self.theme.detach();
        self.queue.clear();
        tracing::debug!(instance = self.id, "unmounted");
    }

    // ========== Attributes ==========

    /// Write an attribute. Unknown names are ignored.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match name.parse::<AttributeName>() {
            Ok(name) => self.write_attribute(name, Some(value)),
            Err(err) => tracing::debug!("{err}, ignoring"),
        }
    }

    /// Remove an attribute, reverting it to its default
    pub fn remove_attribute(&mut self, name: &str) {
        match name.parse::<AttributeName>() {
            Ok(name) => self.write_attribute(name, None),
            Err(err) => tracing::debug!("{err}, ignoring"),
        }
    }

    /// Raw attribute value as written by the host
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let name = name.parse::<AttributeName>().ok()?;
        self.attributes.get(name)
    }

    pub fn preferences(&self) -> PreferenceState {
        self.attributes.preferences()
    }

    fn write_attribute(&mut self, name: AttributeName, value: Option<&str>) {
        let changed = match value {
            Some(value) => self.attributes.set(name, value),
            None => self.attributes.remove(name).is_some(),
        };
        if !changed {
            return;
        }
        if let Err(err) = self.attributes.validate(name) {
            tracing::warn!("{err}, using the default");
        }
        self.notifications.push(Notification::AttributeChanged {
            name,
            value: value.map(str::to_string),
        });

        let prefs = self.attributes.preferences();
        if self.theme.set_mode(prefs.theme, &self.signals) {
            tracing::debug!(instance = self.id, "theme is now {:?}", self.theme.scheme());
        }
    }

    // ========== Input ==========

    /// Pointer event on the widget surface
    pub fn pointer(&mut self, event: PointerEvent) {
        if !self.is_mounted() {
            return;
        }
        self.gesture.on_pointer(event, &mut self.queue);
    }

    /// Size chosen in the menu
    pub fn select_size(&mut self, size: SizeMode) {
        self.select(MenuSelection::Size(size));
    }

    /// Theme chosen in the menu
    pub fn select_theme(&mut self, theme: ThemeMode) {
        self.select(MenuSelection::Theme(theme));
    }

    fn select(&mut self, selection: MenuSelection) {
        let (name, value) = selection.attribute();
        self.write_attribute(name, Some(value));
        self.gesture.cancel_pending_open(&mut self.queue);
        self.close_menu();
    }

    /// Drain host signals: system scheme changes and document clicks.
    ///
    /// Returns whether anything visible changed.
    pub fn poll_signals(&mut self) -> bool {
        let mut changed = self.theme.poll(&self.signals);
        if changed {
            tracing::debug!(instance = self.id, "system scheme applied: {:?}", self.theme.scheme());
        }
        let was_open = self.menu.is_open();
        if self.menu.poll_clicks() {
            // Dismissed before the activation delay ran out
            changed |= self.gesture.cancel_pending_open(&mut self.queue);
            if was_open {
                self.menu_closed();
                changed = true;
            }
        }
        changed
    }

    /// Move virtual time forward by `dt`, firing every timer that falls due
    pub fn advance(&mut self, dt: Duration) {
        self.poll_signals();
        let until = self.queue.now() + dt;
        self.queue.advance_to(until);
        while let Some((_, timer)) = self.queue.pop_due() {
            self.dispatch(timer);
        }
    }

    fn dispatch(&mut self, timer: WidgetTimer) {
        match timer {
            WidgetTimer::Tick => {
                self.ticker.tick(self.clock.as_ref(), &mut self.animator, &mut self.queue);
            }
            WidgetTimer::Flip(flip) => {
                let now = self.queue.now();
                self.animator.on_timer(flip, now);
            }
            WidgetTimer::Gesture(gesture) => {
                let action = self
                    .gesture
                    .on_timer(gesture, &mut self.queue, self.signals.haptics());
                match action {
                    Some(GestureAction::Activated) => self.notifications.push(Notification::Activated),
                    Some(GestureAction::OpenMenu) => {
                        if self.menu.open() {
                            self.notifications.push(Notification::MenuOpened);
                        }
                    }
                    None => {}
                }
            }
        }
    }

    fn close_menu(&mut self) {
        if self.menu.close() {
            self.menu_closed();
        }
    }

    fn menu_closed(&mut self) {
        self.notifications.push(Notification::MenuClosed);
        self.gesture.menu_closed();
    }

    // ========== State ==========

    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn press_phase(&self) -> PressPhase {
        self.gesture.phase()
    }

    pub fn scheme(&self) -> ColorScheme {
        self.theme.scheme()
    }

    pub fn palette(&self) -> &Palette {
        self.theme.palette()
    }

    /// Last good wall-clock sample
    pub fn display_time(&self) -> Option<&DisplayTime> {
        self.ticker.last()
    }

    /// Number of timers waiting on the queue
    pub fn pending_timers(&self) -> usize {
        self.queue.len()
    }

    /// Take every notification emitted since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Snapshot for rendering at the current virtual time
    pub fn view(&self) -> ClockView {
        let now = self.queue.now();
        let prefs = self.attributes.preferences();

        let separator_opacity = match self.mounted_at {
            Some(since) => presets::separator_blink().sample(now.saturating_sub(since)),
            None => 1.0,
        };
        let date_line = self
            .ticker
            .last()
            .filter(|_| self.config.show_date_line)
            .map(|time| DateLine {
                date_label: time.date_label.clone(),
                greeting: time.greeting,
            });
        let ring = match self.gesture.ring_since() {
            Some(since) => RingView::active(now.saturating_sub(since)),
            None => RingView::hidden(),
        };

        ClockView {
            hour: self.animator.view(CellId::Hour, now),
            minute: self.animator.view(CellId::Minute, now),
            separator_opacity,
            date_line,
            ring,
            menu: MenuView {
                open: self.menu.is_open(),
                size: prefs.size,
                theme: prefs.theme,
            },
            scheme: self.theme.scheme(),
            palette: *self.theme.palette(),
            metrics: self.config.scale_profile.metrics(prefs.size),
            parts: ClockView::PARTS,
        }
    }
}

impl Drop for ClockWidget {
    fn drop(&mut self) {
        self.unmount();
    }
}
