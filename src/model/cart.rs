/// Represents one user's shopping cart.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait. Carts are keyed by their
/// owner's [`UserId`], so there is at most one cart per user.
///
/// See [`impl ActorEntity for Cart`](#impl-ActorEntity-for-Cart) for details on:
/// - Creation parameters ([`CartCreate`])
/// - Custom actions ([`CartAction`](crate::cart_actor::CartAction))
use crate::model::{checked_total, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: UserId,
    /// Live lines, product -> quantity. Quantities are always > 0.
    pub lines: BTreeMap<ProductId, u32>,
    /// Lines claimed by an in-flight checkout. While set, the cart is frozen.
    pub pending: Option<BTreeMap<ProductId, u32>>,
}

impl Cart {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            lines: BTreeMap::new(),
            pending: None,
        }
    }

    pub fn is_checking_out(&self) -> bool {
        self.pending.is_some()
    }

    /// The live lines in product id order.
    pub fn to_lines(&self) -> Vec<CartLine> {
        to_cart_lines(self.user_id, &self.lines)
    }
}

pub(crate) fn to_cart_lines(user_id: UserId, lines: &BTreeMap<ProductId, u32>) -> Vec<CartLine> {
    lines
        .iter()
        .map(|(&product_id, &quantity)| CartLine {
            user_id,
            product_id,
            quantity,
        })
        .collect()
}

/// Payload for creating a new cart.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub user_id: UserId,
}

/// One (user, product) entry of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A cart line priced against the current catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartViewItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// The priced cart shown to a shopper before checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub user_id: UserId,
    pub items: Vec<CartViewItem>,
    pub total_amount: Decimal,
    pub total_items: u32,
}

impl CartView {
    /// Totals the priced items. `None` when the amount or the unit count overflows.
    pub fn new(user_id: UserId, items: Vec<CartViewItem>) -> Option<Self> {
        let total_amount = checked_total(items.iter().map(|item| item.subtotal))?;
        let total_items = items
            .iter()
            .try_fold(0u32, |total, item| total.checked_add(item.quantity))?;
        Some(Self {
            user_id,
            items,
            total_amount,
            total_items,
        })
    }
}
