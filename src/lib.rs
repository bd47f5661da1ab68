//! # Storefront Checkout
//!
//! > **A storefront backend whose checkout never oversells and never half-completes.**
//!
//! The crate keeps a product catalog, per-user carts and an order store, and turns a cart into an immutable,
//! paid order while adjusting inventory. Cart, order and stock mutations of one checkout either all happen or
//! none do.
//!
//! ## Core Concepts
//!
//! ### Resource actors
//! Every store is a `ResourceActor<T: ActorEntity>`: a Tokio task that owns its entities and processes one
//! request at a time. No locks are needed for the store itself, and a single request such as
//! "decrement by Q where stock >= Q" is atomic with respect to every other request to that store.
//!
//! ### Saga compensation
//! A checkout spans three stores. The [`CheckoutEngine`](checkout::CheckoutEngine) records each mutation it
//! applies and, on failure, undoes them in reverse order before returning the error.
//!
//! ### Money
//! Prices, subtotals and totals are `rust_decimal::Decimal`. There is no floating point anywhere in the
//! pricing path.
//!
//! ## Module Tour
//!
//! ### 1. The Engine Room ([`framework`])
//! The generic actor, its client, the mock used in tests and the transient-read retry.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor).
//!
//! ### 2. The Stores ([`catalog_actor`], [`cart_actor`], [`order_actor`])
//! Concrete `ActorEntity` implementations for [`Product`](model::Product), [`Cart`](model::Cart) and
//! [`Order`](model::Order), each with its actions and error type.
//!
//! ### 3. The Interface ([`clients`])
//! Domain-specific clients that hide message passing and return typed errors.
//! - **Key items**: [`CatalogClient`](clients::CatalogClient), [`CartClient`](clients::CartClient),
//!   [`OrderClient`](clients::OrderClient).
//!
//! ### 4. Checkout ([`checkout`])
//! Validation, pricing snapshots, order numbers, stock reservation and compensation.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! Spins up the actors, wires them together and shuts them down.
//! - **Key items**: [`StorefrontSystem`](lifecycle::StorefrontSystem), [`Config`](config::Config).
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod cart_actor;
pub mod catalog_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
