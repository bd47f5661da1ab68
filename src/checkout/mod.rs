//! Checkout: the cart-to-order pipeline and its compensation.
//!
//! [`CheckoutEngine::checkout`] either leaves a paid order, decremented stock and an empty cart behind, or
//! leaves all three stores exactly as it found them.

pub mod engine;
pub mod error;
pub mod order_number;
pub mod pricing;
pub mod saga;

pub use engine::CheckoutEngine;
pub use error::CheckoutError;
pub use order_number::{OrderNumberSource, RandomOrderNumbers};
pub use pricing::Quote;
