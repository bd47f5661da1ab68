//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the storefront.
//!
//! ## Overview
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate,
//! providing hierarchical spans that show the complete request flow through the system.
//!
//! ## Configuration
//!
//! The framework uses a compact format that hides the crate/module prefix (`with_target(false)`).
//! This keeps log lines short while still providing rich structured data.
//!
//! - **Structured logging** with `tracing` crate
//! - **Hierarchical spans** for request tracing
//! - **Configurable log levels** via `RUST_LOG` environment variable
//! - **Compact format** optimized for development
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: Startup, shutdown, and final store size, tagged with `entity_type`
//! - **Entity Operations**: Create, Get, List, Update, Delete, and custom Actions
//! - **Checkout**: One `checkout` span per call, every saga step, and every compensation
//! - **Errors**: Detailed error context with entity IDs and failure reasons
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! cargo run
//!
//! # Show saga steps and full payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the checkout engine in detail
//! RUST_LOG=info,storefront_checkout::checkout=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**, a successful checkout of two lines reads:
//!
//! ```text
//! INFO checkout: Action ok entity_type="Cart" id=user_1
//! INFO checkout:create_order: Order stored order_id=order_1 order_number=EC20240131A1B2C3D4
//! INFO checkout: Action ok entity_type="Product" id=product_1
//! INFO checkout: Action ok entity_type="Product" id=product_2
//! INFO checkout: Action ok entity_type="Order" id=order_1
//! INFO checkout: Checkout complete order_id=order_1 total=25.00
//! ```
//!
//! A failed checkout logs `Checkout failed` followed by `Compensating checkout` and one line per undone
//! step. A step that cannot be undone is logged at `error` level.
/// Installs the global subscriber. `RUST_LOG` selects the level; without it, `info` is used.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "checkout:create_order")
        .init();
}
