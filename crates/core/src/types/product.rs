//! Catalog product types.
//!
//! These mirror the JSON records returned by the remote catalog API:
//!
//! ```json
//! {
//!   "id": 1,
//!   "title": "Fjallraven - Foldsack No. 1 Backpack",
//!   "price": 109.95,
//!   "description": "Your perfect pack for everyday use",
//!   "category": "men's clothing",
//!   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
//!   "rating": { "rate": 3.9, "count": 120 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product from the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Long-form description.
    pub description: String,
    /// Category name (one of the catalog's category list).
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Aggregate customer rating.
    pub rating: Rating,
}

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating value (e.g., 3.9).
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

impl Product {
    /// Whether `query` appears in the title or description, ignoring case.
    ///
    /// An empty query matches every product.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
