//! The checkout engine: turns a user's cart into a paid order, or changes nothing.

use super::error::CheckoutError;
use super::order_number::{OrderNumberSource, RandomOrderNumbers};
use super::pricing;
use super::saga::{Saga, SagaStep};
use crate::catalog_actor::StockDecrement;
use crate::clients::{CartClient, CatalogClient, OrderClient};
use crate::config::CheckoutConfig;
use crate::model::{CartLine, Order, OrderCreate, OrderId, OrderLineSnapshot, Product, UserId};
use crate::order_actor::OrderError;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

/// Runs checkouts against the catalog, cart and order stores.
///
/// Cheap to clone; every checkout runs on its own task and shares nothing with other checkouts except the
/// store handles.
///
/// # Flow
///
/// 1. Claim the cart (empty claim -> [`CheckoutError::EmptyCart`]).
/// 2. Read every product and check it covers its line. This check is advisory.
/// 3. Snapshot names and prices, compute the total.
/// 4. Store the order as `pending` under a fresh order number, regenerating the number on collision.
/// 5. Decrement stock line by line with the catalog's conditional decrement.
/// 6. Mark the order paid and commit the cart claim.
///
/// Any failure after step 1 undoes the applied steps in reverse order (see [`Saga`]) before the error is
/// returned.
#[derive(Clone)]
pub struct CheckoutEngine {
    catalog: CatalogClient,
    carts: CartClient,
    orders: OrderClient,
    config: CheckoutConfig,
    numbers: Arc<dyn OrderNumberSource>,
}

impl CheckoutEngine {
    pub fn new(catalog: CatalogClient, carts: CartClient, orders: OrderClient, config: CheckoutConfig) -> Self {
        let numbers = Arc::new(RandomOrderNumbers::new(config.order_prefix.clone()));
        Self {
            catalog,
            carts,
            orders,
            config,
            numbers,
        }
    }

    /// Replaces the order-number generator.
    pub fn with_order_numbers(mut self, numbers: Arc<dyn OrderNumberSource>) -> Self {
        self.numbers = numbers;
        self
    }

    /// Converts the user's cart into a paid order.
    ///
    /// The work runs on a spawned task: dropping the returned future does not interrupt a checkout halfway,
    /// it still either completes or is rolled back.
    ///
    /// If the task dies without finishing its own rollback, the cart claim it holds is released here so the
    /// cart does not stay frozen.
    pub async fn checkout(&self, user_id: UserId) -> Result<Order, CheckoutError> {
        let engine = self.clone();
        let claimed = Arc::new(AtomicBool::new(false));
        let task_claimed = claimed.clone();
        let span = info_span!("checkout", %user_id);

        match tokio::spawn(async move { engine.run(user_id, &task_claimed).await }.instrument(span)).await {
            Ok(result) => result,
            Err(e) => {
                error!(%user_id, error = %e, "Checkout task failed");
                if claimed.load(Ordering::SeqCst) {
                    if let Err(release) = self.carts.release_checkout(user_id).await {
                        error!(%user_id, error = %release, "Could not release the cart claim");
                    }
                }
                Err(CheckoutError::Internal(format!("checkout task failed: {e}")))
            }
        }
    }

    /// `claimed` is set while this run holds the cart claim.
    async fn run(&self, user_id: UserId, claimed: &AtomicBool) -> Result<Order, CheckoutError> {
        let lines = self.carts.begin_checkout(user_id).await?;
        if lines.is_empty() {
            info!("Nothing to check out");
            return Err(CheckoutError::EmptyCart);
        }
        claimed.store(true, Ordering::SeqCst);

        let mut saga = Saga::new(user_id);
        saga.record(SagaStep::CartClaimed);

        match self.place_order(user_id, &lines, &mut saga).await {
            Ok(order) => {
                claimed.store(false, Ordering::SeqCst);
                info!(
                    order_id = %order.id,
                    order_number = %order.order_number,
                    total = %order.total_amount,
                    "Checkout complete"
                );
                Ok(order)
            }
            Err(error) => {
                warn!(error = %error, "Checkout failed");
                saga.compensate(&self.catalog, &self.carts, &self.orders).await;
                claimed.store(false, Ordering::SeqCst);
                Err(error)
            }
        }
    }

    async fn place_order(&self, user_id: UserId, lines: &[CartLine], saga: &mut Saga) -> Result<Order, CheckoutError> {
        let products = self.load_products(lines).await?;
        let quote = pricing::quote(lines.iter().zip(&products))?;
        debug!(total = %quote.total_amount, lines = quote.lines.len(), "Priced");

        let order_id = self.create_order(user_id, quote.lines).await?;
        saga.record(SagaStep::OrderCreated(order_id));

        for line in lines {
            match self
                .catalog
                .decrement_stock(line.product_id, line.quantity)
                .await?
            {
                StockDecrement::Applied { remaining } => {
                    saga.record(SagaStep::StockDecremented {
                        product_id: line.product_id,
                        quantity: line.quantity,
                    });
                    debug!(product_id = %line.product_id, remaining, "Stock reserved");
                }
                StockDecrement::InsufficientStock { available } => {
                    // Another checkout took the stock after the availability check.
                    return Err(CheckoutError::InsufficientStock {
                        product_id: line.product_id,
                        requested: line.quantity,
                        available,
                    });
                }
            }
        }

        let order = self.orders.mark_paid(order_id).await?;
        self.carts.commit_checkout(user_id).await?;
        Ok(order)
    }

    /// Reads the product behind every line and checks it can cover the line right now.
    async fn load_products(&self, lines: &[CartLine]) -> Result<Vec<Product>, CheckoutError> {
        let mut products = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self.catalog.get_product(line.product_id).await?;
            if product.stock < line.quantity {
                return Err(CheckoutError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available: product.stock,
                });
            }
            products.push(product);
        }
        Ok(products)
    }

    #[instrument(skip(self, lines))]
    async fn create_order(&self, user_id: UserId, lines: Vec<OrderLineSnapshot>) -> Result<OrderId, CheckoutError> {
        let attempts = self.config.order_number_attempts.max(1);

        for attempt in 1..=attempts {
            let created_at = Utc::now();
            let params = OrderCreate {
                user_id,
                order_number: self.numbers.next(created_at),
                lines: lines.clone(),
                created_at,
            };
            match self.orders.create_order(params).await {
                Ok(order_id) => return Ok(order_id),
                Err(OrderError::DuplicateOrderNumber(number)) => {
                    warn!(attempt, %number, "Order number already taken, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CheckoutError::OrderNumberExhausted { attempts })
    }
}
