//! Error types for the cart actor.

use crate::model::{ProductId, UserId};
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The cart has no line for this product.
    #[error("Cart item not found: {0}")]
    ItemNotFound(ProductId),

    /// The product does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Quantities must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The cart is frozen by a checkout that has not finished yet.
    #[error("Checkout in progress for {0}")]
    CheckoutInProgress(UserId),

    /// The priced cart is too large to represent.
    #[error("Cart amount exceeds the representable range")]
    AmountOverflow,

    #[error("No checkout pending for {0}")]
    NoCheckoutPending(UserId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
