//! Custom actions for the catalog actor.
//!
//! This module defines the stock operations that can be performed on a [`Product`](crate::model::Product)
//! beyond plain CRUD. They are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action), one at a time, so each action
//! is atomic with respect to every other request to the catalog.

/// Custom actions for Product entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Removes `q` units if, and only if, at least `q` are on hand.
    ///
    /// A shortfall is not an error: it is reported as [`StockDecrement::InsufficientStock`] and the stock is
    /// left untouched.
    DecrementStock(u32),
    /// Puts `q` units back. Used to compensate a decrement.
    RestoreStock(u32),
}

/// Results from CatalogActions - variants match 1:1 with CatalogAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogActionResult {
    /// Current stock level.
    CheckStock(u32),
    DecrementStock(StockDecrement),
    /// Stock level after the units were put back.
    RestoreStock(u32),
}

/// Outcome of a conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    Applied { remaining: u32 },
    InsufficientStock { available: u32 },
}
