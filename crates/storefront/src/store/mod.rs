//! Client-side stores and their change listeners.
//!
//! Each store keeps its state in memory, writes it through to storage on
//! every mutation (cart and favorites only) and then notifies its
//! listeners synchronously with the new state.
//!
//! Listeners are registered with `subscribe` and live as long as the
//! returned [`Subscription`]. Dropping the subscription unsubscribes; the
//! dead entry is pruned on the next notification.

pub mod cart;
pub mod favorites;
pub mod toast;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub use cart::{AddOptions, CartLine, CartState, CartStore, LineKey};
pub use favorites::{FavoritesState, FavoritesStore};
pub use toast::{DismissSchedule, ToastDisplay, ToastPhase, ToastStore};

type Callback<S> = dyn Fn(&S);

/// Registry of change listeners for a store with state `S`.
pub struct Listeners<S> {
    callbacks: RefCell<Vec<Weak<Callback<S>>>>,
}

impl<S> Default for Listeners<S> {
    fn default() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
        }
    }
}

impl<S> Listeners<S> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`; it runs after every mutation until the returned
    /// subscription is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&S) + 'static) -> Subscription<S>
    where
        S: 'static,
    {
        let callback: Rc<Callback<S>> = Rc::new(callback);
        let mut callbacks = self.callbacks.borrow_mut();
        callbacks.retain(|weak| weak.strong_count() > 0);
        callbacks.push(Rc::downgrade(&callback));
        drop(callbacks);
        Subscription { callback }
    }

    /// Call every live listener with `state`, in registration order.
    pub fn notify(&self, state: &S) {
        // Upgrade first so callbacks may subscribe without a RefCell clash.
        let live: Vec<Rc<Callback<S>>> = {
            let mut callbacks = self.callbacks.borrow_mut();
            callbacks.retain(|weak| weak.strong_count() > 0);
            callbacks.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in live {
            callback(state);
        }
    }

    /// Number of live listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> std::fmt::Debug for Listeners<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

/// Handle keeping a listener registered. Drop it (or call
/// [`unsubscribe`](Self::unsubscribe)) to stop receiving changes.
pub struct Subscription<S> {
    callback: Rc<Callback<S>>,
}

impl<S> Subscription<S> {
    /// Stop receiving changes.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<S> std::fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("listeners", &Rc::weak_count(&self.callback))
            .finish()
    }
}
