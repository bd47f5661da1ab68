use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use storefront_checkout::checkout::{CheckoutEngine, CheckoutError, OrderNumberSource};
use storefront_checkout::config::{CheckoutConfig, Config};
use storefront_checkout::framework::ActorClient;
use storefront_checkout::lifecycle::StorefrontSystem;
use storefront_checkout::model::{
    CartLine, OrderNumber, OrderStatus, ProductCreate, ProductId, ProductUpdate, UserId,
};
use storefront_checkout::order_actor::OrderError;

const ALICE: UserId = UserId(1);
const BOB: UserId = UserId(2);

/// A running system with P1 @ 10.00 and P2 @ 5.00, ten of each in stock.
async fn stocked_system() -> (StorefrontSystem, ProductId, ProductId) {
    let system = StorefrontSystem::with_config(Config::default());
    let p1 = system
        .catalog
        .create_product(ProductCreate {
            name: "P1".to_string(),
            unit_price: dec!(10.00),
            stock: 10,
        })
        .await
        .expect("Failed to create P1");
    let p2 = system
        .catalog
        .create_product(ProductCreate {
            name: "P2".to_string(),
            unit_price: dec!(5.00),
            stock: 10,
        })
        .await
        .expect("Failed to create P2");
    (system, p1, p2)
}

fn quantities(lines: &[CartLine]) -> Vec<(ProductId, u32)> {
    lines.iter().map(|l| (l.product_id, l.quantity)).collect()
}

/// Full end-to-end checkout with all real actors.
#[tokio::test]
async fn test_checkout_places_a_paid_order() {
    let (system, p1, p2) = stocked_system().await;
    system.carts.add_item(ALICE, p1, 2).await.unwrap();
    system.carts.add_item(ALICE, p2, 1).await.unwrap();

    let order = system.checkout.checkout(ALICE).await.expect("Checkout failed");

    assert_eq!(order.total_amount, dec!(25.00));
    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.user_id, ALICE);
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.lines[0].product_name, "P1");
    assert_eq!(order.lines[0].subtotal, dec!(20.00));
    assert_eq!(
        order.total_amount,
        order.lines.iter().map(|l| l.subtotal).sum::<Decimal>()
    );

    let expected_prefix = format!("EC{}", Utc::now().format("%Y%m%d"));
    assert!(order.order_number.as_str().starts_with(&expected_prefix));
    assert_eq!(order.order_number.as_str().len(), 18);

    assert_eq!(system.catalog.check_stock(p1).await.unwrap(), 8);
    assert_eq!(system.catalog.check_stock(p2).await.unwrap(), 9);
    assert!(system.carts.list_cart(ALICE).await.unwrap().is_empty());

    let stored = system.orders.get_order(ALICE, order.id).await.unwrap();
    assert_eq!(stored, order);
    let history = system.orders.list_orders(ALICE).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].order_number, order.order_number);
    assert_eq!(history[0].item_count, 2);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_insufficient_stock_changes_nothing() {
    let (system, p1, _) = stocked_system().await;
    system.carts.add_item(ALICE, p1, 5).await.unwrap();
    system
        .catalog
        .update_product(
            p1,
            ProductUpdate {
                stock: Some(3),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();

    let err = system.checkout.checkout(ALICE).await.unwrap_err();

    assert_eq!(
        err,
        CheckoutError::InsufficientStock {
            product_id: p1,
            requested: 5,
            available: 3,
        }
    );
    assert!(err.is_user_correctable());
    assert_eq!(system.catalog.check_stock(p1).await.unwrap(), 3);
    assert_eq!(
        quantities(&system.carts.list_cart(ALICE).await.unwrap()),
        vec![(p1, 5)]
    );
    assert!(system.orders.list_orders(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let (system, p1, _) = stocked_system().await;

    // Never opened
    assert_eq!(
        system.checkout.checkout(ALICE).await,
        Err(CheckoutError::EmptyCart)
    );

    // Opened, then emptied
    system.carts.add_item(ALICE, p1, 1).await.unwrap();
    system.carts.remove_item(ALICE, p1).await.unwrap();
    assert_eq!(
        system.checkout.checkout(ALICE).await,
        Err(CheckoutError::EmptyCart)
    );

    assert_eq!(system.catalog.check_stock(p1).await.unwrap(), 10);
    assert!(system.orders.list_orders(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_product_fails_the_whole_cart() {
    let (system, p1, p2) = stocked_system().await;
    system.carts.add_item(ALICE, p1, 2).await.unwrap();
    system.carts.add_item(ALICE, p2, 1).await.unwrap();
    system.catalog.delete(p2).await.unwrap();

    let err = system.checkout.checkout(ALICE).await.unwrap_err();

    assert_eq!(err, CheckoutError::ProductNotFound(p2));
    assert_eq!(system.catalog.check_stock(p1).await.unwrap(), 10);
    assert_eq!(
        quantities(&system.carts.list_cart(ALICE).await.unwrap()),
        vec![(p1, 2), (p2, 1)]
    );
}

#[tokio::test]
async fn test_orders_are_private_to_their_owner() {
    let (system, p1, _) = stocked_system().await;
    system.carts.add_item(ALICE, p1, 1).await.unwrap();
    let order = system.checkout.checkout(ALICE).await.unwrap();

    assert_eq!(
        system.orders.get_order(BOB, order.id).await,
        Err(OrderError::NotFound(order.id))
    );
    assert!(system.orders.list_orders(BOB).await.unwrap().is_empty());
    assert_eq!(system.orders.list_orders(ALICE).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_snapshots_survive_catalog_edits() {
    let (system, p1, _) = stocked_system().await;
    system.carts.add_item(ALICE, p1, 3).await.unwrap();
    let order = system.checkout.checkout(ALICE).await.unwrap();

    system
        .catalog
        .update_product(
            p1,
            ProductUpdate {
                name: Some("P1 v2".to_string()),
                unit_price: Some(dec!(99.00)),
                stock: None,
            },
        )
        .await
        .unwrap();

    let stored = system.orders.get_order(ALICE, order.id).await.unwrap();
    assert_eq!(stored.lines[0].product_name, "P1");
    assert_eq!(stored.lines[0].unit_price, dec!(10.00));
    assert_eq!(stored.total_amount, dec!(30.00));
}

#[tokio::test]
async fn test_clear_cart_is_idempotent() {
    let (system, p1, _) = stocked_system().await;

    system.carts.clear_cart(ALICE).await.unwrap();
    system.carts.add_item(ALICE, p1, 2).await.unwrap();
    system.carts.clear_cart(ALICE).await.unwrap();
    system.carts.clear_cart(ALICE).await.unwrap();

    assert!(system.carts.list_cart(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_view_prices_lines() {
    let (system, p1, p2) = stocked_system().await;
    let listed: Vec<_> = system
        .catalog
        .list_products()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, vec![p1, p2]);

    system.carts.add_item(ALICE, p2, 1).await.unwrap();
    system.carts.add_item(ALICE, p1, 1).await.unwrap();
    system.carts.add_item(ALICE, p1, 1).await.unwrap();

    let view = system.carts.view_cart(ALICE).await.unwrap();

    assert_eq!(view.total_amount, dec!(25.00));
    assert_eq!(view.total_items, 3);
    assert_eq!(view.items[0].product_id, p1);
    assert_eq!(view.items[0].quantity, 2);
}

/// Hands out the same number every time and counts the calls.
struct FixedNumbers {
    calls: AtomicU32,
}

impl OrderNumberSource for FixedNumbers {
    fn next(&self, _now: chrono::DateTime<Utc>) -> OrderNumber {
        self.calls.fetch_add(1, Ordering::SeqCst);
        OrderNumber("EC20240101DEADBEEF".to_string())
    }
}

#[tokio::test]
async fn test_order_number_collisions_are_bounded() {
    let (system, p1, _) = stocked_system().await;
    let numbers = Arc::new(FixedNumbers {
        calls: AtomicU32::new(0),
    });
    let engine = CheckoutEngine::new(
        system.catalog.clone(),
        system.carts.clone(),
        system.orders.clone(),
        CheckoutConfig::default(),
    )
    .with_order_numbers(numbers.clone());

    system.carts.add_item(ALICE, p1, 1).await.unwrap();
    engine.checkout(ALICE).await.expect("First number is free");

    system.carts.add_item(BOB, p1, 2).await.unwrap();
    let err = engine.checkout(BOB).await.unwrap_err();

    assert_eq!(err, CheckoutError::OrderNumberExhausted { attempts: 5 });
    assert!(err.is_retryable());
    assert_eq!(numbers.calls.load(Ordering::SeqCst), 1 + 5);
    assert_eq!(system.catalog.check_stock(p1).await.unwrap(), 9);
    assert_eq!(
        quantities(&system.carts.list_cart(BOB).await.unwrap()),
        vec![(p1, 2)]
    );
    assert!(system.orders.list_orders(BOB).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_order_amount_leaves_the_cart_editable() {
    let system = StorefrontSystem::with_config(Config::default());
    let gold = system
        .catalog
        .create_product(ProductCreate {
            name: "Gold".to_string(),
            unit_price: Decimal::MAX,
            stock: 10,
        })
        .await
        .unwrap();
    system.carts.add_item(ALICE, gold, 2).await.unwrap();

    let err = system.checkout.checkout(ALICE).await.unwrap_err();

    assert_eq!(err, CheckoutError::AmountOverflow);
    assert!(err.is_user_correctable());
    assert_eq!(system.catalog.check_stock(gold).await.unwrap(), 10);
    assert!(system.orders.list_orders(ALICE).await.unwrap().is_empty());
    assert_eq!(
        quantities(&system.carts.list_cart(ALICE).await.unwrap()),
        vec![(gold, 2)]
    );

    // The claim was released, so the shopper can fix the cart and buy one.
    system.carts.update_quantity(ALICE, gold, 1).await.unwrap();
    let order = system.checkout.checkout(ALICE).await.unwrap();
    assert_eq!(order.total_amount, Decimal::MAX);
}

/// Fails the checkout task after the cart has been claimed.
struct CrashingNumbers;

impl OrderNumberSource for CrashingNumbers {
    fn next(&self, _now: chrono::DateTime<Utc>) -> OrderNumber {
        panic!("order number source crashed");
    }
}

#[tokio::test]
async fn test_crashed_checkout_task_releases_the_cart() {
    let (system, p1, p2) = stocked_system().await;
    let engine = CheckoutEngine::new(
        system.catalog.clone(),
        system.carts.clone(),
        system.orders.clone(),
        CheckoutConfig::default(),
    )
    .with_order_numbers(Arc::new(CrashingNumbers));
    system.carts.add_item(ALICE, p1, 2).await.unwrap();
    system.carts.add_item(ALICE, p2, 1).await.unwrap();

    let err = engine.checkout(ALICE).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Internal(_)));
    assert!(!err.is_retryable());
    assert_eq!(
        quantities(&system.carts.list_cart(ALICE).await.unwrap()),
        vec![(p1, 2), (p2, 1)]
    );
    assert_eq!(system.catalog.check_stock(p1).await.unwrap(), 10);
    system.carts.add_item(ALICE, p2, 1).await.unwrap();
    system.carts.clear_cart(ALICE).await.unwrap();
}
