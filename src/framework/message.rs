//! # Generic Messages
//!
//! The message types exchanged between a [`ResourceClient`](crate::framework::ResourceClient) and its
//! [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate evaluated inside the actor for `List` requests.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    /// Matches every entity in the store.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// The variants are the CRUD lifecycle of a resource plus `List` for filtered reads and `Action` for
/// resource-specific operations. The enum is generic over `T: ActorEntity`, so a cart payload can never be
/// sent to the catalog actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Short name of the operation, for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "create",
            ResourceRequest::Get { .. } => "get",
            ResourceRequest::List { .. } => "list",
            ResourceRequest::Update { .. } => "update",
            ResourceRequest::Delete { .. } => "delete",
            ResourceRequest::Action { .. } => "action",
        }
    }
}
