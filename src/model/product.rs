/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`CatalogAction`](crate::catalog_actor::CatalogAction))
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    /// Units on hand. The only source of truth for availability.
    pub stock: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `name` - Product name
    /// * `unit_price` - Price of one unit
    /// * `stock` - Units on hand
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: Decimal, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            stock,
        }
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub unit_price: Decimal,
    pub stock: u32,
}

/// Partial edit of a product; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub unit_price: Option<Decimal>,
    pub stock: Option<u32>,
}
