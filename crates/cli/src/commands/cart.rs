//! Cart commands. All of them require a logged-in user.
//!
//! # Usage
//!
//! ```bash
//! fakestore cart show
//! fakestore cart add 9
//! fakestore cart set 9 3
//! fakestore cart remove 9
//! fakestore cart clear
//! ```

use fakestore_core::ProductId;
use fakestore_storefront::storage::KeyValueStore;
use fakestore_storefront::{AppError, Storefront};
use tracing::info;

/// Show the cart lines and total.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if no user is logged in.
pub fn show<S: KeyValueStore>(shop: &Storefront<S>) -> Result<(), AppError> {
    require_login(shop)?;

    let cart = shop.cart();
    if cart.is_empty() {
        info!("Your cart is empty");
        return Ok(());
    }

    for item in cart.items() {
        info!(
            "#{:<3} {:>3} x {:<10} {:<10} {}",
            item.product_id,
            item.quantity,
            item.price,
            item.line_total(),
            item.title
        );
    }
    info!("Total: {} ({} items)", cart.total(), cart.item_count());
    Ok(())
}

/// Fetch a product and add one unit of it to the cart.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if no user is logged in.
/// Returns `AppError::Catalog` if the product cannot be fetched.
pub async fn add<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    id: ProductId,
) -> Result<(), AppError> {
    require_login(shop)?;

    shop.fetch_product(id).await?;
    let product = shop
        .catalog()
        .selected_product()
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    shop.add_to_cart(&product)?;
    info!("Added {} to cart", product.title);
    show(shop)
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if no user is logged in.
pub fn remove<S: KeyValueStore>(shop: &mut Storefront<S>, id: ProductId) -> Result<(), AppError> {
    require_login(shop)?;
    shop.remove_from_cart(id)?;
    show(shop)
}

/// Set a product's quantity.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if no user is logged in.
/// Returns `AppError::NotFound` if the product is not in the cart.
pub fn set<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    id: ProductId,
    quantity: i64,
) -> Result<(), AppError> {
    require_login(shop)?;
    if shop.cart().get(id).is_none() {
        return Err(AppError::NotFound(format!("Product {id} in cart")));
    }
    shop.update_quantity(id, quantity)?;
    show(shop)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if no user is logged in.
pub fn clear<S: KeyValueStore>(shop: &mut Storefront<S>) -> Result<(), AppError> {
    require_login(shop)?;
    shop.clear_cart()?;
    info!("Cart cleared");
    Ok(())
}

fn require_login<S: KeyValueStore>(shop: &Storefront<S>) -> Result<(), AppError> {
    if shop.auth().is_authenticated() {
        Ok(())
    } else {
        Err(AppError::Unauthorized(
            "Please log in to use the cart".to_string(),
        ))
    }
}
