//! Integration test support for Fake Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fakestore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - registration, login, logout against a store
//! - `cart_persistence` - carts surviving logout and process restarts
//! - `catalog_client` - the HTTP client and catalog snapshot against a local
//!   stand-in for the catalog API
//!
//! The stand-in API is an `axum` router served on an ephemeral port, answering
//! the same way the public catalog does (including an empty `200` body for
//! unknown product IDs).

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fakestore_core::{Price, Product, ProductId, Rating, User};
use fakestore_storefront::catalog::CatalogClient;
use url::Url;

/// A catalog product with a price in cents.
#[must_use]
pub fn product(id: u32, title: &str, category: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::from_cents(cents),
        description: format!("{title} for everyday use"),
        category: category.to_string(),
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        rating: Rating {
            rate: 4.1,
            count: 120,
        },
    }
}

/// The fixture catalog served by [`fake_catalog`].
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(1, "Fjallraven Foldsack Backpack", "men's clothing", 10995),
        product(2, "Slim Fit T-Shirt", "men's clothing", 2230),
        product(5, "Dragon Station Chain Bracelet", "jewelery", 69500),
        product(9, "Portable External Hard Drive", "electronics", 6400),
    ]
}

/// Category names served by [`fake_catalog`].
#[must_use]
pub fn categories() -> Vec<String> {
    vec![
        "electronics".to_string(),
        "jewelery".to_string(),
        "men's clothing".to_string(),
    ]
}

/// A test user.
#[must_use]
pub fn user(email: &str, password: &str) -> User {
    User::new("Ada", "Lovelace", email, password)
}

/// Router answering like the public catalog API.
pub fn fake_catalog() -> Router {
    Router::new()
        .route("/products", get(|| async { Json(products()) }))
        .route("/products/categories", get(|| async { Json(categories()) }))
        .route("/products/{id}", get(product_by_id))
}

async fn product_by_id(Path(id): Path<u32>) -> Response {
    products()
        .into_iter()
        .find(|p| p.id == ProductId::new(id))
        .map_or_else(|| StatusCode::OK.into_response(), |p| Json(p).into_response())
}

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn spawn_api(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test API");
    });

    Url::parse(&format!("http://{addr}")).expect("valid test URL")
}

/// A catalog client for [`fake_catalog`] served locally.
pub async fn catalog_client() -> CatalogClient {
    CatalogClient::new(&spawn_api(fake_catalog()).await)
}

/// A client pointed at a port nothing listens on.
///
/// # Panics
///
/// Panics if the URL does not parse.
#[must_use]
pub fn unreachable_client() -> CatalogClient {
    CatalogClient::new(&Url::parse("http://127.0.0.1:9").expect("valid URL"))
}
