//! Shopping cart store.
//!
//! The cart is a list of lines keyed by (product, size, color). Adding a
//! product merges into the line with the same key; every other operation
//! addresses a line by its [`LineKey`]. The store is catalog-agnostic: it
//! never checks that a product exists, has a price or offers a size.
//!
//! [`CartState`] holds the pure transitions. [`CartStore`] wraps it with
//! write-through persistence and change listeners.

use std::fmt;
use std::rc::Rc;

use dariy_core::ProductId;
use serde::{Deserialize, Serialize};

use super::{Listeners, Subscription};
use crate::storage::{Persisted, Storage, StorageKey};

/// Identity of a cart line.
///
/// A missing size or color is the empty string, so `None` and `Some("")`
/// address the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    /// Build a key from optional size and color.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            id: id.into(),
            size: size.unwrap_or_default().to_string(),
            color: color.unwrap_or_default().to_string(),
        }
    }

    /// Size, or `None` when the line has no size.
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        non_empty(&self.size)
    }

    /// Color, or `None` when the line has no color.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        non_empty(&self.color)
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.id, self.size, self.color)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CartLine {
    /// Identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.id.clone(), self.size.as_deref(), self.color.as_deref())
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.id == key.id
            && self.size.as_deref().unwrap_or_default() == key.size
            && self.color.as_deref().unwrap_or_default() == key.color
    }
}

/// Options for [`CartStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOptions {
    pub size: Option<String>,
    pub color: Option<String>,
    pub qty: u32,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            size: None,
            color: None,
            qty: 1,
        }
    }
}

impl AddOptions {
    /// One unit, no size, no color.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size.
    #[must_use]
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the quantity to add.
    #[must_use]
    pub const fn qty(mut self, qty: u32) -> Self {
        self.qty = qty;
        self
    }
}

/// Cart lines in display order.
///
/// Invariants: at most one line per [`LineKey`], every quantity is at
/// least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartLine>,
}

impl CartState {
    /// Rebuild a state from stored lines, merging duplicates and dropping
    /// zero quantities.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut state = Self::default();
        for line in lines {
            state.add(
                line.id,
                AddOptions {
                    size: line.size,
                    color: line.color,
                    qty: line.qty,
                },
            );
        }
        state
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    /// The line with `key`, if any.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.qty))
    }

    /// Merge `opts.qty` units into the line for (`id`, size, color), or
    /// append a new line. Adding zero units changes nothing.
    ///
    /// Returns `true` if the state changed.
    pub fn add(&mut self, id: ProductId, opts: AddOptions) -> bool {
        if opts.qty == 0 {
            return false;
        }
        let key = LineKey::new(id, opts.size.as_deref(), opts.color.as_deref());
        if let Some(line) = self.items.iter_mut().find(|line| line.matches(&key)) {
            line.qty = line.qty.saturating_add(opts.qty);
        } else {
            self.items.push(CartLine {
                id: key.id,
                qty: opts.qty,
                size: normalize(opts.size),
                color: normalize(opts.color),
            });
        }
        true
    }

    /// Replace the quantity of the line with `key`. A quantity of zero
    /// removes the line; a missing line is left missing.
    ///
    /// Returns `true` if the state changed.
    pub fn set_quantity(&mut self, key: &LineKey, qty: u32) -> bool {
        if qty == 0 {
            return self.remove(key);
        }
        match self.items.iter_mut().find(|line| line.matches(key)) {
            Some(line) if line.qty != qty => {
                line.qty = qty;
                true
            }
            _ => false,
        }
    }

    /// Delete the line with `key`. Returns `true` if a line was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|line| !line.matches(key));
        self.items.len() != before
    }

    /// Delete every line. Returns `true` if the cart was not empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }
}

/// The cart store: state, persistence and listeners.
pub struct CartStore {
    state: CartState,
    persisted: Persisted<CartState>,
    listeners: Listeners<CartState>,
}

impl CartStore {
    /// Open the cart stored in `storage`, or an empty cart.
    #[must_use]
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        let persisted: Persisted<CartState> = Persisted::new(storage, StorageKey::CART);
        // Re-normalize in case the slot was written by hand or by an older build.
        let state = CartState::from_lines(persisted.load().items);
        tracing::debug!(lines = state.len(), "Cart restored");
        Self {
            state,
            persisted,
            listeners: Listeners::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// The line with `key`, if any.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.state.line(key)
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.state.total_items()
    }

    /// See [`CartState::add`].
    pub fn add(&mut self, id: impl Into<ProductId>, opts: AddOptions) {
        let id = id.into();
        tracing::debug!(product_id = %id, qty = opts.qty, "Cart add");
        let changed = self.state.add(id, opts);
        self.commit(changed);
    }

    /// See [`CartState::set_quantity`].
    pub fn set_quantity(&mut self, key: &LineKey, qty: u32) {
        tracing::debug!(line = %key, qty, "Cart set quantity");
        let changed = self.state.set_quantity(key, qty);
        self.commit(changed);
    }

    /// See [`CartState::remove`].
    pub fn remove(&mut self, key: &LineKey) {
        tracing::debug!(line = %key, "Cart remove");
        let changed = self.state.remove(key);
        self.commit(changed);
    }

    /// See [`CartState::clear`].
    pub fn clear(&mut self) {
        tracing::debug!("Cart clear");
        let changed = self.state.clear();
        self.commit(changed);
    }

    /// Register a listener called with the new state after each change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&CartState) + 'static) -> Subscription<CartState> {
        self.listeners.subscribe(callback)
    }

    fn commit(&self, changed: bool) {
        if changed {
            self.persisted.save(&self.state);
            self.listeners.notify(&self.state);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("persisted", &self.persisted)
            .field("listeners", &self.listeners)
            .finish()
    }
}
