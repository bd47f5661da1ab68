use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for the account that owns a cart and its orders.
///
/// Accounts themselves are managed outside this crate; the storefront only needs the id to scope carts and
/// orders to their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}
