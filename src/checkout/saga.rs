//! Compensation log for one checkout.
//!
//! Every mutation the engine applies is recorded as a [`SagaStep`]. If the checkout fails, the steps are
//! undone newest first: stock is put back, the order is deleted, and the claimed cart lines are released.

use crate::clients::{CartClient, CatalogClient, OrderClient};
use crate::model::{OrderId, ProductId, UserId};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaStep {
    CartClaimed,
    OrderCreated(OrderId),
    StockDecremented { product_id: ProductId, quantity: u32 },
}

#[derive(Debug)]
pub struct Saga {
    user_id: UserId,
    steps: Vec<SagaStep>,
}

impl Saga {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: SagaStep) {
        debug!(user_id = %self.user_id, ?step, "Saga step applied");
        self.steps.push(step);
    }

    /// Undoes every recorded step, newest first.
    ///
    /// A failing undo is logged and the remaining steps are still attempted. Returns the number of steps
    /// that could not be undone.
    pub async fn compensate(self, catalog: &CatalogClient, carts: &CartClient, orders: &OrderClient) -> usize {
        let user_id = self.user_id;
        let mut failures = 0;
        info!(%user_id, steps = self.steps.len(), "Compensating checkout");

        for step in self.steps.into_iter().rev() {
            let outcome = match step {
                SagaStep::StockDecremented {
                    product_id,
                    quantity,
                } => catalog
                    .restore_stock(product_id, quantity)
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string()),
                SagaStep::OrderCreated(order_id) => orders
                    .delete_order(order_id)
                    .await
                    .map_err(|e| e.to_string()),
                SagaStep::CartClaimed => carts
                    .release_checkout(user_id)
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string()),
            };

            match outcome {
                Ok(()) => debug!(%user_id, ?step, "Compensated"),
                Err(e) => {
                    failures += 1;
                    error!(%user_id, ?step, error = %e, "Compensation step failed");
                }
            }
        }

        if failures == 0 {
            info!(%user_id, "Checkout rolled back");
        }
        failures
    }
}
