//! Generic resource-actor framework.
//!
//! Every store in the crate (catalog, carts, orders) is a [`ResourceActor`] managing one
//! [`ActorEntity`] type, reached through a cloneable [`ResourceClient`].
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns and serializes access to entities
//! - [`ResourceClient`] - Type-safe client that talks to an actor over channels
//! - [`ActorClient`] - Provided `get` / `list` / `delete` for store-specific clients
//! - [`FrameworkError`] - Common error types
//! - [`retry`] - Backoff for transient read failures
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod retry;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
pub use retry::{retry_transient, RetryPolicy};
