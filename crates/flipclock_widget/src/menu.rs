//! Settings menu controller
//!
//! Holds the menu's open flag and, while attached, a subscription to
//! document-level clicks. A click landing outside both the widget surface
//! and the menu panel closes the menu. Selections write an attribute and
//! always close the menu.

use crate::attributes::AttributeName;
use flipclock_core::{ClickTarget, HostSignals, InstanceId};
use flipclock_theme::{SizeMode, ThemeMode};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// An option chosen in one of the menu's controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSelection {
    Size(SizeMode),
    Theme(ThemeMode),
}

impl MenuSelection {
    /// The attribute write this selection stands for
    pub fn attribute(&self) -> (AttributeName, &'static str) {
        match self {
            MenuSelection::Size(size) => (AttributeName::Size, size.as_str()),
            MenuSelection::Theme(theme) => (AttributeName::Theme, theme.as_str()),
        }
    }
}

/// Open/close state of one widget's settings menu
#[derive(Debug)]
pub struct MenuController {
    instance: InstanceId,
    open: bool,
    clicks: Option<broadcast::Receiver<ClickTarget>>,
}

impl MenuController {
    pub fn new(instance: InstanceId) -> Self {
        Self {
            instance,
            open: false,
            clicks: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Subscribe to document-level clicks
    pub fn attach(&mut self, signals: &HostSignals) {
        if self.clicks.is_none() {
            self.clicks = Some(signals.subscribe_clicks());
        }
    }

    /// Release the click subscription and close the menu
    pub fn detach(&mut self) {
        self.clicks = None;
        self.open = false;
    }

    /// Returns false if the menu was already open
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        tracing::debug!("menu opened");
        self.open = true;
        true
    }

    /// Returns false if the menu was already closed
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        tracing::debug!("menu closed");
        self.open = false;
        true
    }

    /// Drain pending document clicks, closing the menu on an outside one.
    ///
    /// Returns true if any click landed outside, open menu or not.
    pub fn poll_clicks(&mut self) -> bool {
        let mut outside = false;
        let mut closed = false;
        if let Some(rx) = self.clicks.as_mut() {
            loop {
                match rx.try_recv() {
                    Ok(target) => outside |= !target.is_inside(self.instance),
                    Err(TryRecvError::Empty) => break,
                    // Where the missed clicks landed is unknown
                    Err(TryRecvError::Lagged(skipped)) => {
                        tracing::warn!("missed {skipped} document clicks");
                        outside = true;
                    }
                    Err(TryRecvError::Closed) => {
                        closed = true;
                        break;
                    }
                }
            }
        }
        if closed {
            self.clicks = None;
        }
        if outside {
            self.close();
        }
        outside
    }
}
