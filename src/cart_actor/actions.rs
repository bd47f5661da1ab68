//! Custom actions for the cart actor.
//!
//! Besides line editing, a cart supports a three-step *claim* used by checkout:
//!
//! 1. [`CartAction::BeginCheckout`] moves the live lines into a pending hold and returns them. The cart is
//!    frozen until the hold is settled, and a second claim sees an empty cart.
//! 2. [`CartAction::CommitCheckout`] discards the hold once the order exists. This is the cart-clear step.
//! 3. [`CartAction::ReleaseCheckout`] puts the held lines back exactly as they were.

use crate::model::{CartLine, ProductId};

/// Custom actions for Cart entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// Adds `quantity` units, merging with an existing line.
    AddItem { product_id: ProductId, quantity: u32 },
    /// Replaces the quantity of an existing line.
    SetQuantity { product_id: ProductId, quantity: u32 },
    RemoveItem(ProductId),
    Clear,
    BeginCheckout,
    CommitCheckout,
    ReleaseCheckout,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartActionResult {
    /// The line after the merge.
    AddItem(CartLine),
    SetQuantity(CartLine),
    /// The removed line.
    RemoveItem(CartLine),
    Clear(()),
    /// The claimed lines, empty when there was nothing to claim.
    BeginCheckout(Vec<CartLine>),
    CommitCheckout(()),
    /// The lines put back into the cart.
    ReleaseCheckout(Vec<CartLine>),
}
