//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! fakestore register -f Ada -l Lovelace -e ada@example.com -p secret
//! fakestore login -e ada@example.com -p secret
//! fakestore whoami
//! fakestore logout
//! ```

use fakestore_core::User;
use fakestore_storefront::storage::KeyValueStore;
use fakestore_storefront::{AppError, Storefront};
use tracing::info;

/// Register a new account and log in.
///
/// # Errors
///
/// Returns `AppError::Auth` if the email is already registered.
pub fn register<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<(), AppError> {
    shop.register(User {
        first_name,
        last_name,
        email,
        password,
    })?;
    welcome(shop);
    Ok(())
}

/// Log in to an existing account.
///
/// # Errors
///
/// Returns `AppError::Auth` if the user is unknown or the password is wrong.
pub fn login<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    shop.login(email, password)?;
    welcome(shop);
    Ok(())
}

/// Log out.
///
/// # Errors
///
/// Returns `AppError::Auth` if the session cannot be removed.
pub fn logout<S: KeyValueStore>(shop: &mut Storefront<S>) -> Result<(), AppError> {
    if !shop.auth().is_authenticated() {
        info!("Not logged in");
        return Ok(());
    }
    shop.logout()?;
    info!("Logged out");
    Ok(())
}

/// Show the logged-in user.
pub fn whoami<S: KeyValueStore>(shop: &Storefront<S>) {
    match shop.auth().user() {
        Some(user) => info!("{} {} <{}>", user.first_name, user.last_name, user.email),
        None => info!("Not logged in"),
    }
}

fn welcome<S: KeyValueStore>(shop: &Storefront<S>) {
    if let Some(user) = shop.auth().user() {
        info!("Welcome, {}", user.first_name);
    }
    let cart = shop.cart();
    if !cart.is_empty() {
        info!("Your cart has {} item(s)", cart.line_count());
    }
}
