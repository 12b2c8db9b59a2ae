//! In-memory snapshot of catalog data.

use fakestore_core::Product;

/// Message recorded when a failed fetch carries no message of its own.
const DEFAULT_FETCH_ERROR: &str = "Failed to fetch products";

/// Category value that matches every product.
const ALL_CATEGORIES: &str = "all";

/// The last fetched products, categories and selected product.
///
/// Every fetch moves through three states: pending ([`begin`](Self::begin)
/// sets `loading` and clears `error`), fulfilled (data stored, `loading`
/// cleared) or rejected (message stored in `error`, `loading` cleared). Data
/// from earlier fetches is kept when a later one fails. A result always
/// replaces whatever the previous fetch of the same kind stored.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    products: Vec<Product>,
    categories: Vec<String>,
    selected_product: Option<Product>,
    loading: bool,
    error: Option<String>,
}

impl CatalogCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a fetch as pending.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Store a fetched product list.
    pub fn fulfill_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loading = false;
    }

    /// Store a fetched category list.
    pub fn fulfill_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
        self.loading = false;
    }

    /// Store a fetched product as the selected product.
    pub fn fulfill_product(&mut self, product: Product) {
        self.selected_product = Some(product);
        self.loading = false;
    }

    /// Record a failed fetch.
    pub fn reject(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(if message.is_empty() {
            DEFAULT_FETCH_ERROR.to_owned()
        } else {
            message
        });
        self.loading = false;
    }

    /// Select a product without fetching it, or clear the selection.
    pub fn set_selected_product(&mut self, product: Option<Product>) {
        self.selected_product = product;
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub const fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Products matching `filter`, in catalog order.
    #[must_use]
    pub fn filtered(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }
}

/// Category and free-text filter over the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only products in this category; `None` or `"all"` matches every category.
    pub category: Option<String>,
    /// Case-insensitive substring of the title or description.
    pub query: String,
}

impl ProductFilter {
    /// Whether `product` passes both the category and the text filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => product.category == category,
        };
        category_ok && product.matches_query(&self.query)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fakestore_core::{Price, ProductId, Rating};

    use super::*;

    fn product(id: u32, title: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_cents(1000),
            description: format!("{title} description"),
            category: category.to_string(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    #[test]
    fn test_pending_fulfilled() {
        let mut cache = CatalogCache::new();
        cache.reject("boom");

        cache.begin();
        assert!(cache.is_loading());
        assert!(cache.error().is_none());

        cache.fulfill_products(vec![product(1, "Backpack", "bags")]);
        assert!(!cache.is_loading());
        assert_eq!(cache.products().len(), 1);
    }

    #[test]
    fn test_rejected_keeps_previous_data() {
        let mut cache = CatalogCache::new();
        cache.begin();
        cache.fulfill_categories(vec!["electronics".to_string()]);

        cache.begin();
        cache.reject("Network Error");
        assert!(!cache.is_loading());
        assert_eq!(cache.error(), Some("Network Error"));
        assert_eq!(cache.categories(), ["electronics".to_string()]);
    }

    #[test]
    fn test_reject_without_message_uses_default() {
        let mut cache = CatalogCache::new();
        cache.reject("");
        assert_eq!(cache.error(), Some("Failed to fetch products"));
    }

    #[test]
    fn test_later_result_overwrites_earlier() {
        let mut cache = CatalogCache::new();
        cache.fulfill_product(product(1, "Backpack", "bags"));
        cache.fulfill_product(product(2, "Jacket", "clothing"));
        assert_eq!(cache.selected_product().unwrap().id, ProductId::new(2));

        cache.set_selected_product(None);
        assert!(cache.selected_product().is_none());
    }

    #[test]
    fn test_filter_by_category_and_query() {
        let mut cache = CatalogCache::new();
        cache.fulfill_products(vec![
            product(1, "Backpack", "bags"),
            product(2, "Rain Jacket", "clothing"),
            product(3, "Denim Jacket", "clothing"),
        ]);

        let all = ProductFilter::default();
        assert_eq!(cache.filtered(&all).len(), 3);

        let explicit_all = ProductFilter {
            category: Some("all".to_string()),
            query: String::new(),
        };
        assert_eq!(cache.filtered(&explicit_all).len(), 3);

        let clothing = ProductFilter {
            category: Some("clothing".to_string()),
            query: "RAIN".to_string(),
        };
        let ids: Vec<_> = cache.filtered(&clothing).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId::new(2)]);

        let description = ProductFilter {
            category: None,
            query: "backpack desc".to_string(),
        };
        assert_eq!(cache.filtered(&description).len(), 1);
    }
}
