//! Transient notification ("toast") store and its display controller.
//!
//! The store holds at most one message and has no timers: a new message
//! replaces the pending one. Auto-dismissal belongs to the display side,
//! modelled by [`ToastDisplay`], which hands out dismiss timers tagged with
//! a token. Only the newest token is honoured, so a timer started for a
//! replaced message can never clear its successor.

use std::fmt;
use std::time::Duration;

use super::{Listeners, Subscription};
use crate::config::ToastTimings;

/// The toast store.
#[derive(Default)]
pub struct ToastStore {
    message: Option<String>,
    revision: u64,
    listeners: Listeners<Option<String>>,
}

impl ToastStore {
    /// Create a store with no pending message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Counter bumped by every [`show`](Self::show), so repeating the same
    /// text still counts as a new notification.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace any pending message with `message`.
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "Toast");
        self.message = Some(message);
        self.revision += 1;
        self.listeners.notify(&self.message);
    }

    /// Drop the pending message.
    pub fn clear(&mut self) {
        self.message = None;
        self.listeners.notify(&self.message);
    }

    /// Register a listener called with the message after each change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        callback: impl Fn(&Option<String>) + 'static,
    ) -> Subscription<Option<String>> {
        self.listeners.subscribe(callback)
    }
}

impl fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastStore")
            .field("message", &self.message)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

/// What the toast element currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToastPhase {
    /// Nothing rendered.
    #[default]
    Hidden,
    /// Message fully visible.
    Visible(String),
    /// Message playing its exit transition.
    Exiting(String),
}

/// Identifies the dismiss timers started for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DismissToken(u64);

/// Timers the host must start after a new message is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissSchedule {
    pub token: DismissToken,
    /// When to call [`ToastDisplay::on_hide_elapsed`].
    pub hide_after: Duration,
    /// When to call [`ToastDisplay::on_clear_elapsed`].
    pub clear_after: Duration,
}

/// Display-side state machine for the toast.
///
/// `Hidden` → (`sync` sees a new message) → `Visible` → (hide timer) →
/// `Exiting` → (clear timer clears the store) → `Hidden`.
#[derive(Debug, Clone)]
pub struct ToastDisplay {
    timings: ToastTimings,
    phase: ToastPhase,
    seen_revision: u64,
    generation: u64,
}

impl ToastDisplay {
    /// Create a hidden display.
    #[must_use]
    pub fn new(timings: ToastTimings) -> Self {
        Self {
            timings,
            phase: ToastPhase::Hidden,
            seen_revision: 0,
            generation: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &ToastPhase {
        &self.phase
    }

    /// Message to render, if any.
    #[must_use]
    pub fn rendered(&self) -> Option<&str> {
        match &self.phase {
            ToastPhase::Hidden => None,
            ToastPhase::Visible(message) | ToastPhase::Exiting(message) => Some(message),
        }
    }

    /// Returns `true` while the exit transition plays.
    #[must_use]
    pub const fn is_exiting(&self) -> bool {
        matches!(self.phase, ToastPhase::Exiting(_))
    }

    /// Bring the display in line with the store.
    ///
    /// Returns the timers to start when a new message appeared. Any timers
    /// from an earlier schedule become stale.
    pub fn sync(&mut self, store: &ToastStore) -> Option<DismissSchedule> {
        let Some(message) = store.message() else {
            if self.phase != ToastPhase::Hidden {
                self.phase = ToastPhase::Hidden;
                self.generation += 1;
            }
            return None;
        };

        if store.revision() == self.seen_revision && self.phase != ToastPhase::Hidden {
            return None;
        }

        self.seen_revision = store.revision();
        self.generation += 1;
        self.phase = ToastPhase::Visible(message.to_string());
        Some(DismissSchedule {
            token: DismissToken(self.generation),
            hide_after: self.timings.visible,
            clear_after: self.timings.visible + self.timings.exit,
        })
    }

    /// The hide timer for `token` fired. Returns `true` if the exit
    /// transition started.
    pub fn on_hide_elapsed(&mut self, token: DismissToken) -> bool {
        if token.0 != self.generation {
            return false;
        }
        match std::mem::take(&mut self.phase) {
            ToastPhase::Visible(message) => {
                self.phase = ToastPhase::Exiting(message);
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    /// The clear timer for `token` fired. Clears the store unless the
    /// token is stale or the store got a message this display has not
    /// shown yet. Returns `true` if the store was cleared.
    pub fn on_clear_elapsed(&mut self, token: DismissToken, store: &mut ToastStore) -> bool {
        if token.0 != self.generation
            || self.phase == ToastPhase::Hidden
            || store.revision() != self.seen_revision
        {
            return false;
        }
        store.clear();
        self.phase = ToastPhase::Hidden;
        self.generation += 1;
        true
    }
}

impl Default for ToastDisplay {
    fn default() -> Self {
        Self::new(ToastTimings::default())
    }
}
