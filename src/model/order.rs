/// Represents a placed order together with its line snapshots.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
use crate::model::{ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Human-facing order reference, unique across the order store (e.g. `EC20240131A1B2C3D4`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderNumber(pub String);

impl OrderNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Copy of a product's name and price taken when the order was placed.
///
/// Later catalog edits never change an existing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineSnapshot {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

impl OrderLineSnapshot {
    /// Prices a snapshot. `None` when the subtotal does not fit in a `Decimal`.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Option<Self> {
        Some(Self {
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity,
            subtotal: line_subtotal(unit_price, quantity)?,
        })
    }
}

/// `unit_price * quantity`, or `None` on overflow.
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Sum of the amounts, or `None` on overflow.
pub fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_number: OrderNumber,
    /// Always the sum of the line subtotals.
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineSnapshot>,
}

/// Payload for creating a new order. Header and lines are written in one request.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub order_number: OrderNumber,
    pub lines: Vec<OrderLineSnapshot>,
    pub created_at: DateTime<Utc>,
}

/// Compact listing entry for a user's order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Number of distinct lines, not units.
    pub item_count: usize,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number.clone(),
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
            item_count: order.lines.len(),
        }
    }
}
