//! Cart snapshots on disk across restarts.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use serde_json::Value;

use shopeasy_core::cart::CartState;
use shopeasy_core::{Price, Product, ProductId, Storage};
use shopeasy_storefront::FileStorage;
use shopeasy_storefront::models::keys;
use shopeasy_storefront::services::{CartStore, RestoreOutcome, WishlistStore};

fn product(id: i64, cents: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Price::from_cents(cents),
        image: format!("https://img.example/{id}.jpg"),
        description: "A product".to_string(),
        category: "electronics".to_string(),
        rating: None,
    }
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = CartStore::open(FileStorage::new(dir.path()));
    store.add_item(product(1, 1000));
    store.add_item(product(1, 1000));
    store.add_item(product(2, 1999));
    store.set_quantity(ProductId::new(2), 3);
    let before = store.state().clone();
    drop(store);

    let store = CartStore::open(FileStorage::new(dir.path()));
    assert_eq!(store.restore_outcome(), RestoreOutcome::Restored);
    assert_eq!(store.state(), &before);
    assert_eq!(store.state().item_count(), 5);
    assert_eq!(store.state().total(), Decimal::new(7997, 2));
}

#[test]
fn test_snapshot_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::open(FileStorage::new(dir.path()));
    store.add_item(product(7, 1050));
    store.add_item(product(7, 1050));

    let raw = std::fs::read_to_string(dir.path().join("shopeasy.cart.json")).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    let object = json.as_object().unwrap();

    let mut keys: Vec<_> = object.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["itemCount", "items", "total"]);
    assert_eq!(json["itemCount"], 2);
    assert_eq!(json["total"].as_f64(), Some(21.0));

    let item = &json["items"][0];
    assert_eq!(item["id"], 7);
    assert_eq!(item["price"].as_f64(), Some(10.5));
    assert_eq!(item["quantity"], 2);
    assert_eq!(item["title"], "Product 7");
}

#[test]
fn test_corrupt_snapshot_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.set_item(keys::CART, "{\"items\": [").unwrap();

    let mut store = CartStore::open(storage.clone());
    assert_eq!(store.restore_outcome(), RestoreOutcome::Discarded);
    assert!(store.state().is_empty());

    // The next write replaces the corrupt file
    store.add_item(product(1, 500));
    let reopened = CartStore::open(storage);
    assert_eq!(reopened.restore_outcome(), RestoreOutcome::Restored);
    assert_eq!(reopened.state().item_count(), 1);
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let line = r#"{"id":1,"title":"A","price":10,"image":"","description":"","quantity":1}"#;
    storage
        .set_item(
            keys::CART,
            &format!(r#"{{"items":[{line},{line}],"total":20,"itemCount":2}}"#),
        )
        .unwrap();

    let store = CartStore::open(storage);
    assert_eq!(store.restore_outcome(), RestoreOutcome::Discarded);
    assert!(store.state().is_empty());
}

#[test]
fn test_drifted_aggregates_are_recomputed() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage
        .set_item(
            keys::CART,
            r#"{"items":[{"id":1,"title":"A","price":10,"image":"","description":"","quantity":2}],"total":999,"itemCount":42}"#,
        )
        .unwrap();

    let store = CartStore::open(storage);
    assert_eq!(store.restore_outcome(), RestoreOutcome::Restored);
    assert_eq!(store.state().item_count(), 2);
    assert_eq!(store.state().total(), Decimal::new(20, 0));
}

#[test]
fn test_unwritable_data_dir_keeps_in_memory_state() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the data directory should be makes every write fail
    let blocker = dir.path().join("data");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut store = CartStore::open(FileStorage::new(&blocker));
    store.add_item(product(1, 1000));
    store.add_item(product(2, 1000));

    assert!(store.is_dirty());
    assert_eq!(store.state().item_count(), 2);
    assert_eq!(store.state().total(), Decimal::new(20, 0));
}

#[test]
fn test_cart_and_wishlist_share_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let mut cart = CartStore::open(storage.clone());
    let mut wishlist = WishlistStore::open(storage.clone());
    wishlist.add(product(3, 300));
    wishlist.move_to_cart(ProductId::new(3), &mut cart);
    drop((cart, wishlist));

    let cart = CartStore::open(storage.clone());
    let wishlist = WishlistStore::open(storage);
    assert!(wishlist.items().is_empty());
    assert_eq!(cart.state().items()[0].id, ProductId::new(3));
    assert_ne!(cart.state(), &CartState::new());
}
