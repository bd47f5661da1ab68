//! # Resource Actor
//!
//! The server half of the framework: one Tokio task that owns every entity of one type and answers
//! [`ResourceRequest`]s strictly one at a time.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// **Concurrency model**: the actor processes its mailbox sequentially, so the `store` needs no lock and a
/// request (including an awaited `handle_action`) runs to completion before the next one is looked at.
/// Stores built on top rely on this for their atomic operations, e.g. the catalog's
/// "decrement by Q where stock >= Q".
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a background task.
///
/// ```rust
/// use storefront_checkout::framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, hits: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] enum CounterAction { Hit }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = ();
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, hits: 0 })
///     }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(CounterCreate).await.unwrap();
///     assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    keys: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when it is full, client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            keys: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn allocate_id(&mut self, params: &T::Create) -> T::Id {
        match T::assigned_id(params) {
            Some(id) => id,
            None => {
                let id = T::Id::from(self.next_id);
                self.next_id += 1;
                id
            }
        }
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T::Id, FrameworkError> {
        let id = self.allocate_id(&params);
        if self.store.contains_key(&id) {
            return Err(FrameworkError::Conflict(id.to_string()));
        }

        let mut item =
            T::from_create_params(id.clone(), params).map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        let key = item.unique_key();
        if let Some(key) = &key {
            if self.keys.contains_key(key) {
                return Err(FrameworkError::Conflict(key.clone()));
            }
        }

        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        if let Some(key) = key {
            self.keys.insert(key, id.clone());
        }
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook, so entities can reach dependencies (other clients) that were
    /// created after this actor but before its loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Product" instead of "storefront_checkout::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        if let Some(key) = item.unique_key() {
                            self.keys.remove(&key);
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
