//! Core types for Fake Store.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use cart::CartItem;
pub use id::*;
pub use price::Price;
pub use product::{Product, Rating};
pub use user::User;
