//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (Product, Cart, Order) implements to be
//! managed by the generic [`ResourceActor`](crate::framework::ResourceActor). It fixes the associated types for
//! ids, DTOs, actions, context and errors, and provides the lifecycle hooks (`on_create`, `on_update`,
//! `on_delete`, `handle_action`).
//!
//! # Identity and Uniqueness
//! By default the actor hands out sequential ids (`T::Id: From<u32>`). Two provided methods let an entity opt
//! into stronger identity rules that the actor enforces inside its message loop:
//!
//! - [`ActorEntity::assigned_id`]: the id comes from the create payload (a cart is keyed by its owner).
//! - [`ActorEntity::unique_key`]: a natural key that must not repeat across the store (an order number).
//!
//! A clash on either rule is answered with [`FrameworkError::Conflict`](crate::framework::FrameworkError::Conflict)
//! and nothing is stored.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// The hooks are `#[async_trait]` so they can await other actors. The `Context` type is injected into every
/// hook when the actor starts (`run(context)`), which lets dependencies be wired after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `DecrementStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per action. Clients can recover it from
    /// [`FrameworkError::EntityError`](crate::framework::FrameworkError::EntityError) with
    /// [`FrameworkError::downcast_entity`](crate::framework::FrameworkError::downcast_entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Id taken from the create payload instead of the actor's counter.
    fn assigned_id(_params: &Self::Create) -> Option<Self::Id> {
        None
    }

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Natural key that must be unique across the store. Fixed at creation.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    ///
    /// The actor does not process another request for this store until the returned future resolves, so
    /// check-and-mutate logic written here is atomic.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
