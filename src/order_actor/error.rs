//! Error types for the order actor.

use crate::model::{OrderId, OrderNumber, OrderStatus};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found (or belongs to someone else).
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// Another order already carries this number.
    #[error("Duplicate order number: {0}")]
    DuplicateOrderNumber(OrderNumber),

    #[error("Order has no lines")]
    EmptyOrder,

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
