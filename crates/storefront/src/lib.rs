//! DARIY Storefront library.
//!
//! Client-side state for a statically exported storefront: the bundled
//! product catalog, the shopping cart, the favorites list and the transient
//! notification, plus the derived totals and the checkout hand-off to
//! messaging channels.
//!
//! # Architecture
//!
//! - [`catalog`] - Read-only product list, facets and collections
//! - [`store`] - Cart, favorites and toast stores with change listeners
//! - [`storage`] - Versioned key/value persistence behind a trait
//! - [`totals`] - Cart lines joined with catalog prices
//! - [`checkout`] - Order message and messaging deep links
//! - [`state`] - The [`Storefront`] context that owns one of each store
//! - [`actions`] - User actions dispatched by the presentation layer
//!
//! Stores are plain owned values. There are no global singletons; each test
//! or front-end builds its own [`Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod store;
pub mod totals;

pub use error::{Result, StorefrontError};
pub use state::Storefront;
