//! Errors surfaced by [`CheckoutEngine::checkout`](super::CheckoutEngine::checkout).
//!
//! Whatever the variant, the stores are left as they were before the call.

use crate::cart_actor::CartError;
use crate::catalog_actor::CatalogError;
use crate::model::ProductId;
use crate::order_actor::OrderError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A line subtotal or the order total is too large to represent.
    #[error("Order amount exceeds the representable range")]
    AmountOverflow,

    #[error("No unique order number after {attempts} attempts")]
    OrderNumberExhausted { attempts: u32 },

    /// A store failed or stopped answering.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The checkout task itself failed. Not a store fault, so retrying does not help.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Running the same checkout again, unchanged, may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::OrderNumberExhausted { .. } | CheckoutError::Persistence(_)
        )
    }

    /// The shopper can fix the cause by editing their cart.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            CheckoutError::EmptyCart
                | CheckoutError::ProductNotFound(_)
                | CheckoutError::InsufficientStock { .. }
                | CheckoutError::AmountOverflow
        )
    }
}

impl From<CatalogError> for CheckoutError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => CheckoutError::ProductNotFound(id),
            other => CheckoutError::Persistence(other.to_string()),
        }
    }
}

impl From<CartError> for CheckoutError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::ProductNotFound(id) => CheckoutError::ProductNotFound(id),
            CartError::AmountOverflow => CheckoutError::AmountOverflow,
            CartError::InsufficientStock {
                product_id,
                requested,
                available,
            } => CheckoutError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            other => CheckoutError::Persistence(other.to_string()),
        }
    }
}

impl From<OrderError> for CheckoutError {
    fn from(e: OrderError) -> Self {
        CheckoutError::Persistence(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let short = CheckoutError::InsufficientStock {
            product_id: ProductId(1),
            requested: 5,
            available: 3,
        };
        assert!(short.is_user_correctable() && !short.is_retryable());
        assert!(CheckoutError::EmptyCart.is_user_correctable());
        assert!(!CheckoutError::EmptyCart.is_retryable());
        assert!(CheckoutError::OrderNumberExhausted { attempts: 5 }.is_retryable());
        assert!(CheckoutError::Persistence("down".into()).is_retryable());
        assert!(CheckoutError::AmountOverflow.is_user_correctable());
        assert!(!CheckoutError::AmountOverflow.is_retryable());
        let crashed = CheckoutError::Internal("task panicked".into());
        assert!(!crashed.is_retryable() && !crashed.is_user_correctable());
    }

    #[test]
    fn missing_products_keep_their_id() {
        assert_eq!(
            CheckoutError::from(CatalogError::NotFound(ProductId(4))),
            CheckoutError::ProductNotFound(ProductId(4))
        );
        assert!(matches!(
            CheckoutError::from(CatalogError::ActorCommunicationError("closed".into())),
            CheckoutError::Persistence(_)
        ));
    }
}
