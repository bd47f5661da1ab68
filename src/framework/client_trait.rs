//! # ActorClient Trait
//!
//! Common surface for the store-specific clients: `get`, `list` and `delete` are provided on top of the
//! inner [`ResourceClient`], with errors mapped into the store's own error type.
use crate::framework::{ActorEntity, FrameworkError, Filter, ResourceClient};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit standard read and delete operations.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The store-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the store-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `filter`, in no particular order.
    #[tracing::instrument(skip(self, filter))]
    async fn list(&self, filter: Filter<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
