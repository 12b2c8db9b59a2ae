//! Integration tests for cart persistence across sessions and restarts.

use fakestore_core::{Price, ProductId};
use fakestore_integration_tests::{product, unreachable_client, user};
use fakestore_storefront::Storefront;
use fakestore_storefront::storage::{FileStore, KeyValueStore, MemoryStore, keys};

#[test]
fn test_logout_then_login_restores_cart() {
    let store = MemoryStore::new();
    let mut shop = Storefront::open(&store, unreachable_client()).unwrap();
    shop.register(user("a@x.com", "p")).unwrap();

    shop.add_to_cart(&product(1, "Backpack", "bags", 10995)).unwrap();
    shop.add_to_cart(&product(1, "Backpack", "bags", 10995)).unwrap();
    shop.add_to_cart(&product(2, "T-Shirt", "clothing", 2230)).unwrap();
    let before = shop.cart().clone();
    assert_eq!(before.total(), Price::from_cents(24220));

    shop.logout().unwrap();
    assert!(shop.cart().is_empty());
    assert_eq!(shop.cart().total(), Price::ZERO);

    shop.login("a@x.com", "p").unwrap();
    assert_eq!(shop.cart(), &before);
}

#[test]
fn test_carts_follow_the_session() {
    let store = MemoryStore::new();
    let mut shop = Storefront::open(&store, unreachable_client()).unwrap();

    shop.register(user("a@x.com", "p")).unwrap();
    shop.add_to_cart(&product(1, "Backpack", "bags", 10995)).unwrap();

    shop.register(user("b@x.com", "q")).unwrap();
    assert!(shop.cart().is_empty());
    shop.add_to_cart(&product(9, "Hard Drive", "electronics", 6400)).unwrap();
    shop.update_quantity(ProductId::new(9), 2).unwrap();

    shop.login("a@x.com", "p").unwrap();
    assert_eq!(shop.cart().line_count(), 1);
    assert!(shop.cart().get(ProductId::new(1)).is_some());

    shop.login("b@x.com", "q").unwrap();
    assert_eq!(shop.cart().total(), Price::from_cents(12800));
}

#[test]
fn test_anonymous_cart_touches_no_cart_keys() {
    let store = MemoryStore::new();
    let mut shop = Storefront::open(&store, unreachable_client()).unwrap();

    shop.add_to_cart(&product(1, "Backpack", "bags", 10995)).unwrap();
    shop.update_quantity(ProductId::new(1), 4).unwrap();
    assert_eq!(shop.cart().item_count(), 4);
    shop.clear_cart().unwrap();

    assert!(store.is_empty());
}

#[test]
fn test_quantity_clamping_removes_lines() {
    let store = MemoryStore::new();
    let mut shop = Storefront::open(&store, unreachable_client()).unwrap();
    shop.register(user("a@x.com", "p")).unwrap();
    shop.add_to_cart(&product(1, "Backpack", "bags", 10995)).unwrap();
    shop.add_to_cart(&product(2, "T-Shirt", "clothing", 2230)).unwrap();

    shop.update_quantity(ProductId::new(1), 0).unwrap();
    shop.update_quantity(ProductId::new(2), -5).unwrap();

    assert!(shop.cart().is_empty());
    assert_eq!(shop.cart().total(), Price::ZERO);
    assert_eq!(store.get(&keys::cart("a@x.com")).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_clear_cart_deletes_record_but_keeps_account() {
    let store = MemoryStore::new();
    let mut shop = Storefront::open(&store, unreachable_client()).unwrap();
    shop.register(user("a@x.com", "p")).unwrap();
    shop.add_to_cart(&product(5, "Bracelet", "jewelery", 69500)).unwrap();

    shop.clear_cart().unwrap();

    assert!(store.get(&keys::cart("a@x.com")).unwrap().is_none());
    assert!(store.get(keys::USERS).unwrap().is_some());
    assert!(shop.auth().is_authenticated());
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut shop = Storefront::open(store, unreachable_client()).unwrap();
        shop.register(user("a@x.com", "p")).unwrap();
        shop.add_to_cart(&product(9, "Hard Drive", "electronics", 6400)).unwrap();
        shop.add_to_cart(&product(9, "Hard Drive", "electronics", 6400)).unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    let shop = Storefront::open(store, unreachable_client()).unwrap();
    assert_eq!(shop.session().unwrap().email(), "a@x.com");
    assert_eq!(shop.cart().get(ProductId::new(9)).unwrap().quantity, 2);
    assert_eq!(shop.cart().total(), Price::from_cents(12800));
}

#[test]
fn test_total_is_recomputed_from_stored_lines() {
    let store = MemoryStore::new();
    store
        .set(
            keys::USERS,
            r#"[{"firstName":"Ada","lastName":"Lovelace","email":"a@x.com","password":"p"}]"#,
        )
        .unwrap();
    store
        .set(
            keys::CURRENT_USER,
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"a@x.com","password":"p"}"#,
        )
        .unwrap();
    store
        .set(
            &keys::cart("a@x.com"),
            r#"[{"id":3,"title":"Jacket","price":55.99,"image":"","quantity":2},
                {"id":4,"title":"Shirt","price":15.99,"image":"","quantity":1}]"#,
        )
        .unwrap();

    let shop = Storefront::open(&store, unreachable_client()).unwrap();
    assert_eq!(shop.cart().total(), Price::from_cents(12797));
    assert_eq!(shop.cart().line_count(), 2);
}

#[test]
fn test_session_without_registered_user_is_not_restored() {
    let store = MemoryStore::new();
    store
        .set(
            keys::CURRENT_USER,
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"a@x.com","password":"p"}"#,
        )
        .unwrap();
    store
        .set(
            &keys::cart("a@x.com"),
            r#"[{"id":3,"title":"Jacket","price":55.99,"image":"","quantity":2}]"#,
        )
        .unwrap();

    let shop = Storefront::open(&store, unreachable_client()).unwrap();
    assert!(!shop.auth().is_authenticated());
    assert!(shop.cart().is_empty());
}
