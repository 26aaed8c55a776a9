//! Contract tests for the stores and the merge engine against an
//! in-memory database.

use oxcart_commerce::prelude::*;
use oxcart_db::{params, Db};
use oxcart_store::{ensure_schema, fixtures, shared, CartService, CartStore, ProductStore, SharedDb};

fn setup() -> (SharedDb, CartService) {
    let db = shared(Db::open_in_memory().expect("open in-memory db"));
    ensure_schema(&db).expect("schema");
    let products = ProductStore::new(db.clone());
    let carts = CartStore::new(db.clone());
    let service = CartService::new(db.clone(), products, carts);
    (db, service)
}

fn create_product(service: &CartService, title: &str, price: i64) -> Product {
    service
        .products()
        .create(NewProduct::new(title, Money::new(price)))
        .expect("create product")
}

#[test]
fn adding_same_product_twice_merges_into_one_line_item() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();

    service.add_product(cart.id, product.id, 3).unwrap();
    let view = service.add_product(cart.id, product.id, 4).unwrap();

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].quantity, 7);
}

#[test]
fn round_trip_fallout_added_twice() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();

    service.add_product(cart.id, product.id, 1).unwrap();
    let view = service.add_product(cart.id, product.id, 1).unwrap();

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].quantity, 2);
    assert_eq!(view.subtotal, Money::new(398));
    assert_eq!(view.subtotal_formatted, "3.98");
}

#[test]
fn subtotal_sums_distinct_line_items() {
    let (_db, service) = setup();
    let fallout = create_product(&service, "Fallout", 199);
    let bloodborne = create_product(&service, "Bloodborne", 599);
    let cart = service.carts().create().unwrap();

    service.add_product(cart.id, fallout.id, 2).unwrap();
    let view = service.add_product(cart.id, bloodborne.id, 1).unwrap();

    assert_eq!(view.subtotal, Money::new(2 * 199 + 599));
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].line_total, Money::new(398));
}

#[test]
fn rejected_zero_quantity_never_changes_the_cart() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();
    service.add_product(cart.id, product.id, 1).unwrap();

    let err = service.add_product(cart.id, product.id, 0).unwrap_err();
    assert!(matches!(err, CommerceError::Validation(_)));

    let view = service.cart_view(cart.id).unwrap();
    assert_eq!(view.items[0].quantity, 1);
    assert_eq!(view.subtotal, Money::new(199));
}

#[test]
fn negative_quantity_is_rejected() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();

    let err = service.add_product(cart.id, product.id, -1).unwrap_err();
    assert!(matches!(err, CommerceError::Validation(_)));
    assert!(service.cart_view(cart.id).unwrap().items.is_empty());
}

#[test]
fn add_resolves_cart_and_product_separately() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();

    let err = service
        .add_product(CartId::new(999), product.id, 1)
        .unwrap_err();
    assert!(matches!(err, CommerceError::CartNotFound(_)));

    let err = service
        .add_product(cart.id, ProductId::new(999), 1)
        .unwrap_err();
    assert!(matches!(err, CommerceError::ProductNotFound(_)));
}

#[test]
fn removing_absent_product_reports_line_item_not_found() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();

    let err = service.remove_product(cart.id, product.id).unwrap_err();
    assert!(matches!(err, CommerceError::LineItemNotFound { .. }));
}

#[test]
fn remove_deletes_the_whole_line_item() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();
    service.add_product(cart.id, product.id, 5).unwrap();

    service.remove_product(cart.id, product.id).unwrap();

    let view = service.cart_view(cart.id).unwrap();
    assert!(view.items.is_empty());
    assert_eq!(view.subtotal_formatted, "0.00");
}

#[test]
fn deleting_referenced_product_is_refused() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();
    service.add_product(cart.id, product.id, 1).unwrap();

    let err = service.products().delete(product.id).unwrap_err();
    assert!(matches!(err, CommerceError::ProductInUse(_)));

    // The line item still resolves to a live product.
    let view = service.cart_view(cart.id).unwrap();
    assert_eq!(view.items[0].title, "Fallout");

    // Once the reference is gone, deletion goes through.
    service.remove_product(cart.id, product.id).unwrap();
    service.products().delete(product.id).unwrap();
    let err = service.products().get(product.id).unwrap_err();
    assert!(matches!(err, CommerceError::ProductNotFound(_)));
}

#[test]
fn listing_pages_cover_all_products_without_duplicates() {
    let (_db, service) = setup();
    assert_eq!(fixtures::seed(service.products()).unwrap(), 5);

    let first = service.products().list(Page::new(0, 3)).unwrap();
    let second = service.products().list(Page::new(3, 3)).unwrap();

    assert_eq!(first.items.len(), 3);
    assert_eq!(second.items.len(), 2);
    assert_eq!(first.total, 5);
    assert!(first.has_more());
    assert!(!second.has_more());

    let mut ids: Vec<i64> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|p| p.id.get())
        .collect();
    let sorted = {
        let mut s = ids.clone();
        s.sort_unstable();
        s
    };
    // Already in stable ascending order, and nothing repeated.
    assert_eq!(ids, sorted);
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[test]
fn seeding_twice_is_idempotent() {
    let (_db, service) = setup();
    assert_eq!(fixtures::seed(service.products()).unwrap(), 5);
    assert_eq!(fixtures::seed(service.products()).unwrap(), 0);
    assert_eq!(service.products().list(Page::default()).unwrap().total, 5);
}

#[test]
fn update_applies_only_provided_fields() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);

    let updated = service
        .products()
        .update(
            product.id,
            ProductPatch {
                title: None,
                price: Some(Money::zero()),
            },
        )
        .unwrap();

    // Zero is provided input, so it is applied; the title is untouched.
    assert_eq!(updated.title, "Fallout");
    assert_eq!(updated.price, Money::zero());
}

#[test]
fn update_rejects_empty_title_and_leaves_record_unchanged() {
    let (_db, service) = setup();
    let product = create_product(&service, "Fallout", 199);

    let err = service
        .products()
        .update(
            product.id,
            ProductPatch {
                title: Some("  ".to_string()),
                price: Some(Money::new(50)),
            },
        )
        .unwrap_err();
    assert!(matches!(err, CommerceError::Validation(_)));

    let reloaded = service.products().get(product.id).unwrap();
    assert_eq!(reloaded.title, "Fallout");
    assert_eq!(reloaded.price, Money::new(199));
}

#[test]
fn update_unknown_product_is_not_found() {
    let (_db, service) = setup();
    let err = service
        .products()
        .update(ProductId::new(42), ProductPatch::default())
        .unwrap_err();
    assert!(matches!(err, CommerceError::ProductNotFound(_)));
}

#[test]
fn cart_get_distinguishes_unknown_ids() {
    let (_db, service) = setup();
    let cart = service.carts().create().unwrap();

    assert!(service.carts().get(cart.id).is_ok());
    let err = service.carts().get(CartId::new(999)).unwrap_err();
    assert!(matches!(err, CommerceError::CartNotFound(_)));
}

#[test]
fn eager_load_preserves_insertion_order_across_merges() {
    let (_db, service) = setup();
    let fallout = create_product(&service, "Fallout", 199);
    let bloodborne = create_product(&service, "Bloodborne", 599);
    let cart = service.carts().create().unwrap();

    service.add_product(cart.id, fallout.id, 1).unwrap();
    service.add_product(cart.id, bloodborne.id, 1).unwrap();
    // Merging back into the first line item must not reorder it.
    service.add_product(cart.id, fallout.id, 1).unwrap();

    let loaded = service.carts().get_with_items(cart.id).unwrap();
    let order: Vec<ProductId> = loaded.items.iter().map(|i| i.product_id).collect();
    assert_eq!(order, vec![fallout.id, bloodborne.id]);
    assert_eq!(loaded.items[0].quantity, 2);
}

#[test]
fn storage_uniqueness_backstops_the_merge_invariant() {
    let (db, service) = setup();
    let product = create_product(&service, "Fallout", 199);
    let cart = service.carts().create().unwrap();
    service.add_product(cart.id, product.id, 1).unwrap();

    // Bypass the merge engine and try to insert a second row for the
    // same (cart, product) pair; the storage constraint must refuse it.
    let conn = db.lock().unwrap();
    let err = conn
        .execute(
            "INSERT INTO cart_products (cart_id, product_id, quantity) VALUES (?, ?, ?)",
            params![cart.id.get(), product.id.get(), 1],
        )
        .unwrap_err();
    assert!(err.is_constraint());
}
