//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! fakestore products
//! fakestore products --category "men's clothing" --search jacket
//! fakestore product 3
//! fakestore categories
//! ```

use fakestore_core::{Product, ProductId};
use fakestore_storefront::catalog::ProductFilter;
use fakestore_storefront::storage::KeyValueStore;
use fakestore_storefront::{AppError, Storefront};
use tracing::info;

/// List products, filtered by category and search text.
///
/// # Errors
///
/// Returns `AppError::Catalog` if the catalog cannot be fetched.
pub async fn products<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    category: Option<String>,
    query: String,
) -> Result<(), AppError> {
    shop.fetch_products().await?;

    let filter = ProductFilter { category, query };
    let products = shop.catalog().filtered(&filter);

    if products.is_empty() {
        info!("No products found. Try adjusting your search or filter criteria.");
        return Ok(());
    }

    for product in products {
        info!(
            "#{:<3} {:<10} {:<18} {}",
            product.id,
            product.price,
            product.category,
            product.title
        );
    }
    Ok(())
}

/// Show one product in detail.
///
/// # Errors
///
/// Returns `AppError::Catalog` if the product cannot be fetched.
pub async fn product<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    id: ProductId,
) -> Result<(), AppError> {
    shop.fetch_product(id).await?;
    if let Some(product) = shop.catalog().selected_product() {
        describe(product);
    }
    Ok(())
}

/// List category names.
///
/// # Errors
///
/// Returns `AppError::Catalog` if the categories cannot be fetched.
pub async fn categories<S: KeyValueStore>(shop: &mut Storefront<S>) -> Result<(), AppError> {
    shop.fetch_categories().await?;
    for category in shop.catalog().categories() {
        info!("{}", capitalize(category));
    }
    Ok(())
}

fn describe(product: &Product) {
    info!("{}", product.title);
    info!("  Price:    {}", product.price);
    info!("  Category: {}", capitalize(&product.category));
    info!(
        "  Rating:   {:.1} ({} reviews)",
        product.rating.rate, product.rating.count
    );
    info!("  Image:    {}", product.image);
    info!("  {}", product.description);
}

/// Upper-case the first character, the way category names are displayed.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
