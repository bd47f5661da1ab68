//! # Mock Framework
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered from a queue of
//! scripted expectations instead of a running actor. It is the tool for reaching failure paths that a real
//! store will not produce on demand, such as a catalog that stops answering halfway through a checkout.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, answers are scripted | Real state management |
//! | **Error Injection** | `return_err(..)` | Hard to provoke |
//! | **Use Case** | Logic *around* the client (engine, saga) | The store itself, full system |
//!
//! Expectations are consumed in order. A request of the wrong kind is answered by dropping its response
//! channel (the caller sees [`FrameworkError::ActorDropped`]); a request for the wrong id is answered normally.
//! Both are recorded and reported by [`MockClient::verify`].
//!
//! ```rust
//! use storefront_checkout::framework::mock::MockClient;
//! use storefront_checkout::framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Shelf { id: u32 }
//! #[derive(Debug)] struct ShelfCreate;
//! #[derive(Debug, thiserror::Error)] #[error("shelf error")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = ShelfCreate; type Update = ();
//!     type Action = (); type ActionResult = (); type Context = (); type Error = ShelfError;
//!     fn from_create_params(id: u32, _: ShelfCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shelf>::new();
//!     mock.expect_get(1).return_err(FrameworkError::Timeout(50));
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::Timeout(50))));
//!     mock.verify();
//! }
//! ```
//!
//! For message-level assertions use [`create_mock_client`] with the [`expect_get`] / [`expect_action`]
//! helpers and answer each request by hand.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn check_id<I: PartialEq + std::fmt::Debug>(kind: &str, expected: &I, got: &I, mismatches: &Mutex<Vec<String>>) {
    if expected != got {
        mismatches
            .lock()
            .unwrap()
            .push(format!("{kind}: expected id {expected:?}, got {got:?}"));
    }
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let seen = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id("get", &want, &id, &seen);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        check_id("update", &want, &id, &seen);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        check_id("delete", &want, &id, &seen);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, action, respond_to },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        if want != id {
                            seen.lock()
                                .unwrap()
                                .push(format!("action {action:?}: expected id {want:?}, got {id:?}"));
                        }
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        seen.lock()
                            .unwrap()
                            .push(format!("unexpected request: {}", request.kind()));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Mock saw unexpected requests: {mismatches:#?}");
        }
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Completes one expectation with its scripted response.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.expectations.lock().unwrap().push_back((self.make)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back((self.make)(Err(error)));
    }
}

// =============================================================================
// MESSAGE-LEVEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver owned by the test.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
