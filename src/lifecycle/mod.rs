//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the storefront's actors.
//!
//! **Key Responsibilities:**
//! 1. **Actor Creation** - Instantiate the catalog, cart and order actors and their clients
//! 2. **Dependency Injection** - Wire actors together via context injection
//! 3. **Engine Construction** - Hand the store clients to the [`CheckoutEngine`](crate::checkout::CheckoutEngine)
//! 4. **Graceful Shutdown** - Coordinate clean termination of all actors
//! 5. **Observability Setup** - Initialize tracing and logging infrastructure
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them when their loop starts (`run(context)`):
//!
//! ```rust,ignore
//! // No dependencies
//! impl ActorEntity for Product {
//!     type Context = ();
//! }
//!
//! // Cart lines are checked against the live catalog
//! impl ActorEntity for Cart {
//!     type Context = CatalogClient;
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - Wait for all actor tasks to finish
//!
//! The cart actor's context holds a catalog client. The dependency graph is acyclic, so the catalog actor
//! stops as soon as the cart actor has stopped and released it.

pub mod storefront;
pub mod tracing;

pub use self::storefront::StorefrontSystem;
pub use self::tracing::setup_tracing;
