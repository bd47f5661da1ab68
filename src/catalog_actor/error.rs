//! Error types for the catalog actor.

use crate::model::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Prices must be strictly positive.
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    /// The provided quantity is invalid (zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Stock overflow: {stock} + {quantity} exceeds the maximum")]
    StockOverflow { stock: u32, quantity: u32 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}
