//! Cart line item.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// One product line in a cart.
///
/// Holds a snapshot of the product's title, price and image taken when it was
/// first added. The product ID serializes as `id`; any other product fields in
/// older stored carts are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    /// Always at least 1; a line whose quantity reaches 0 is removed.
    pub quantity: u32,
}

impl CartItem {
    /// A new line for `product` with a quantity of 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = CartItem {
            product_id: ProductId::new(1),
            title: "Backpack".to_string(),
            price: Price::from_cents(1050),
            image: String::new(),
            quantity: 3,
        };
        assert_eq!(item.line_total(), Price::from_cents(3150));
    }

    #[test]
    fn test_loads_stored_item_with_full_product_fields() {
        let json = r#"{
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL.jpg",
            "rating": { "rate": 4.1, "count": 259 },
            "quantity": 2
        }"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.product_id, ProductId::new(2));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.line_total(), Price::from_cents(4460));
    }
}
