//! Custom actions for the order actor.

use crate::model::Order;

/// Custom actions for Order entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// `pending -> paid`. No payment is captured; this only records that the order is settled.
    MarkPaid,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The order after the transition.
    MarkPaid(Order),
}
