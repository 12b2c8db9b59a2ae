//! Fake Store Core - Shared types library.
//!
//! This crate provides the domain types used across the Fake Store components:
//! - `storefront` - Session, cart ledger and catalog logic
//! - `cli` - Command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, catalog products, users and cart items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
