//! Fake Store Storefront - session, cart and catalog logic.
//!
//! # Architecture
//!
//! - Durable state lives behind the [`storage::KeyValueStore`] seam
//!   (a JSON file in production, an in-memory map in tests)
//! - [`auth`] keeps the registered user directory and the active session
//! - [`cart`] keeps one cart per user, keyed by email
//! - [`catalog`] fetches products from the remote catalog API and mirrors
//!   them into an in-memory snapshot
//! - [`Storefront`] wires these together the way the interface drives them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::Storefront;
