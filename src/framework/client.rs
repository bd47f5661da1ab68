//! # Generic Client
//!
//! The type-safe handle used to talk to a [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{Filter, ResourceRequest};
use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// Forwards CRUD, List and Action requests over a Tokio mpsc channel and awaits the answer on a oneshot
/// channel. It only holds a sender, so cloning is cheap and clones can be shared across tasks.
///
/// Reads (`get`, `list`) are bounded by the optional read timeout. Writes always wait for the actor's
/// answer: a write whose outcome is unknown could not be compensated safely.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    read_timeout: Option<Duration>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            read_timeout: self.read_timeout,
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self {
            sender,
            read_timeout: None,
        }
    }

    /// Bounds every read issued through this client.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    async fn request<R>(
        &self,
        message: ResourceRequest<T>,
        response: oneshot::Receiver<Result<R, FrameworkError>>,
    ) -> Result<R, FrameworkError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    async fn bounded<R>(
        &self,
        fut: impl Future<Output = Result<R, FrameworkError>>,
    ) -> Result<R, FrameworkError> {
        match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| FrameworkError::Timeout(limit.as_millis() as u64))?,
            None => fut.await,
        }
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Create { params, respond_to }, response)
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.bounded(self.request(ResourceRequest::Get { id, respond_to }, response))
            .await
    }

    pub async fn list(&self, filter: Filter<T>) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.bounded(self.request(ResourceRequest::List { filter, respond_to }, response))
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            },
            response,
        )
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Delete { id, respond_to }, response)
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(
            ResourceRequest::Action {
                id,
                action,
                respond_to,
            },
            response,
        )
        .await
    }
}
