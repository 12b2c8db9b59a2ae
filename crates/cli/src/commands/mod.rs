//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod catalog;
