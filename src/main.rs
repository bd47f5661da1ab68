use rust_decimal::Decimal;
use storefront_checkout::lifecycle::{setup_tracing, StorefrontSystem};
use storefront_checkout::model::{ProductCreate, UserId};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting storefront demo");

    let system = StorefrontSystem::new();

    let lamp = system
        .catalog
        .create_product(ProductCreate {
            name: "Desk Lamp".to_string(),
            unit_price: Decimal::new(1000, 2),
            stock: 10,
        })
        .await
        .map_err(|e| e.to_string())?;
    let bulb = system
        .catalog
        .create_product(ProductCreate {
            name: "Spare Bulb".to_string(),
            unit_price: Decimal::new(500, 2),
            stock: 10,
        })
        .await
        .map_err(|e| e.to_string())?;

    let alice = UserId(1);
    let span = tracing::info_span!("shopping", user_id = %alice);
    async {
        system.carts.add_item(alice, lamp, 2).await?;
        system.carts.add_item(alice, bulb, 1).await?;
        let view = system.carts.view_cart(alice).await?;
        info!(total = %view.total_amount, items = view.total_items, "Cart ready");
        Ok::<_, storefront_checkout::cart_actor::CartError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    match system.checkout.checkout(alice).await {
        Ok(order) => info!(
            order_number = %order.order_number,
            total = %order.total_amount,
            status = %order.status,
            "Order placed"
        ),
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    // A second checkout finds the cart empty.
    if let Err(e) = system.checkout.checkout(alice).await {
        info!(error = %e, "Second checkout rejected");
    }

    let history = system
        .orders
        .list_orders(alice)
        .await
        .map_err(|e| e.to_string())?;
    for summary in &history {
        info!(order_number = %summary.order_number, total = %summary.total_amount, "Order history");
    }

    let remaining = system.catalog.check_stock(lamp).await.map_err(|e| e.to_string())?;
    info!(product_id = %lamp, remaining, "Stock after checkout");

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
