//! `ActorEntity` implementation for [`Order`].
//!
//! An order is written once, header and lines together, and afterwards only its status moves. The order
//! number is the entity's unique key, so the actor itself rejects a second order with the same number.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::framework::ActorEntity;
use crate::model::{checked_total, line_subtotal, Order, OrderCreate, OrderId, OrderLineSnapshot, OrderStatus};
use async_trait::async_trait;
use rust_decimal::Decimal;

fn validate_line(line: &OrderLineSnapshot) -> Result<(), OrderError> {
    if line.quantity == 0 {
        return Err(OrderError::ValidationError(format!(
            "{} has quantity 0",
            line.product_id
        )));
    }
    if line.unit_price <= Decimal::ZERO {
        return Err(OrderError::ValidationError(format!(
            "{} has non-positive price {}",
            line.product_id, line.unit_price
        )));
    }
    if line_subtotal(line.unit_price, line.quantity) != Some(line.subtotal) {
        return Err(OrderError::ValidationError(format!(
            "{} subtotal {} does not match {} x {}",
            line.product_id, line.subtotal, line.unit_price, line.quantity
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = ();
    type Error = OrderError;

    /// Builds a `pending` order; the total is always derived from the lines.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        params.lines.iter().try_for_each(validate_line)?;
        let total_amount = checked_total(params.lines.iter().map(|line| line.subtotal))
            .ok_or_else(|| OrderError::ValidationError("order total overflows".to_string()))?;

        Ok(Self {
            id,
            user_id: params.user_id,
            order_number: params.order_number,
            total_amount,
            status: OrderStatus::Pending,
            created_at: params.created_at,
            lines: params.lines,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.order_number.to_string())
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), OrderError> {
        Ok(())
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::MarkPaid => {
                if self.status != OrderStatus::Pending {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Paid,
                    });
                }
                self.status = OrderStatus::Paid;
                Ok(OrderActionResult::MarkPaid(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderNumber, ProductId, UserId};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn create(lines: Vec<OrderLineSnapshot>) -> OrderCreate {
        OrderCreate {
            user_id: UserId(1),
            order_number: OrderNumber("EC20240101AAAAAAAA".into()),
            lines,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn total_is_the_sum_of_subtotals() {
        let order = Order::from_create_params(
            OrderId(1),
            create(vec![
                OrderLineSnapshot::new(ProductId(1), "Pen", dec!(10.00), 2).unwrap(),
                OrderLineSnapshot::new(ProductId(2), "Pad", dec!(5.00), 1).unwrap(),
            ]),
        )
        .unwrap();

        assert_eq!(order.total_amount, dec!(25.00));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.unique_key().as_deref(), Some("EC20240101AAAAAAAA"));
    }

    #[test]
    fn empty_orders_are_rejected() {
        assert_eq!(
            Order::from_create_params(OrderId(1), create(vec![])),
            Err(OrderError::EmptyOrder)
        );
    }

    #[test]
    fn tampered_subtotals_are_rejected() {
        let mut line = OrderLineSnapshot::new(ProductId(1), "Pen", dec!(10.00), 2).unwrap();
        line.subtotal = dec!(19.99);
        assert!(matches!(
            Order::from_create_params(OrderId(1), create(vec![line])),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let line = |id| OrderLineSnapshot::new(ProductId(id), "Gold", Decimal::MAX, 1).unwrap();
        assert!(matches!(
            Order::from_create_params(OrderId(1), create(vec![line(1), line(2)])),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn only_pending_orders_can_be_paid() {
        let mut order = Order::from_create_params(
            OrderId(1),
            create(vec![OrderLineSnapshot::new(ProductId(1), "Pen", dec!(1.25), 4).unwrap()]),
        )
        .unwrap();

        let OrderActionResult::MarkPaid(paid) = order.handle_action(OrderAction::MarkPaid, &()).await.unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);

        assert_eq!(
            order.handle_action(OrderAction::MarkPaid, &()).await,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Paid,
                to: OrderStatus::Paid,
            })
        );
    }
}
