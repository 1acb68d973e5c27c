//! Favorites store: a persisted set of product IDs.

use std::fmt;
use std::rc::Rc;

use dariy_core::ProductId;
use serde::{Deserialize, Serialize};

use super::{Listeners, Subscription};
use crate::storage::{Persisted, Storage, StorageKey};

/// Favorite product IDs, duplicate-free, in the order they were liked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesState {
    ids: Vec<ProductId>,
}

impl FavoritesState {
    /// Rebuild a state from stored IDs, dropping repeats.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut state = Self::default();
        for id in ids {
            if !state.has(id.as_str()) {
                state.ids.push(id);
            }
        }
        state
    }

    /// Favorite IDs in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Returns `true` if `id` is a favorite.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav.as_str() == id)
    }

    /// Number of favorites.
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// Returns `true` if `id` is a favorite afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.has(id.as_str()) {
            self.ids.retain(|fav| *fav != id);
            false
        } else {
            self.ids.push(id);
            true
        }
    }
}

/// The favorites store: state, persistence and listeners.
pub struct FavoritesStore {
    state: FavoritesState,
    persisted: Persisted<FavoritesState>,
    listeners: Listeners<FavoritesState>,
}

impl FavoritesStore {
    /// Open the favorites stored in `storage`, or an empty set.
    #[must_use]
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        let persisted: Persisted<FavoritesState> = Persisted::new(storage, StorageKey::FAVORITES);
        let state = FavoritesState::from_ids(persisted.load().ids);
        tracing::debug!(count = state.count(), "Favorites restored");
        Self {
            state,
            persisted,
            listeners: Listeners::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &FavoritesState {
        &self.state
    }

    /// See [`FavoritesState::ids`].
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        self.state.ids()
    }

    /// See [`FavoritesState::has`].
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.state.has(id)
    }

    /// See [`FavoritesState::count`].
    #[must_use]
    pub fn count(&self) -> usize {
        self.state.count()
    }

    /// See [`FavoritesState::toggle`].
    pub fn toggle(&mut self, id: impl Into<ProductId>) -> bool {
        let id = id.into();
        let liked = self.state.toggle(id.clone());
        tracing::debug!(product_id = %id, liked, "Favorites toggle");
        self.persisted.save(&self.state);
        self.listeners.notify(&self.state);
        liked
    }

    /// Register a listener called with the new state after each change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        callback: impl Fn(&FavoritesState) + 'static,
    ) -> Subscription<FavoritesState> {
        self.listeners.subscribe(callback)
    }
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("state", &self.state)
            .field("persisted", &self.persisted)
            .field("listeners", &self.listeners)
            .finish()
    }
}
