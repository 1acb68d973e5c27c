//! DARIY Core - Shared types library.
//!
//! This crate provides common types used across all DARIY components:
//! - `storefront` - Catalog, cart, favorites and notification state
//! - `cli` - Command-line front-end over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no catalog
//! loading. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and phone numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
