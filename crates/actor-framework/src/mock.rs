//! # Mocking Utilities
//!
//! Two ways to stand in for a real actor when testing code that sits on top of a
//! `ResourceClient<T>`:
//!
//! | | [`MockClient`] | [`create_mock_client`] |
//! |---|---|---|
//! | Style | queue canned replies up front | answer each request by hand |
//! | Sees payloads | no | yes (`expect_create`, `expect_action`, ...) |
//! | Good for | error injection, simple reads | asserting what was sent |
//!
//! Replies are consumed strictly in the order they were queued; a request that does
//! not match the next expectation panics the mock task, which surfaces in the test as
//! [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Mug { id: u32 }
//! #[derive(Debug)] struct MugCreate;
//! #[derive(Debug)] struct MugUpdate;
//! #[derive(Debug)] enum MugAction {}
//! #[derive(Debug, thiserror::Error)] #[error("mug")] struct MugError;
//!
//! #[async_trait]
//! impl ActorEntity for Mug {
//!     type Id = u32; type Create = MugCreate; type Update = MugUpdate;
//!     type Action = MugAction; type ActionResult = (); type Context = (); type Error = MugError;
//!     fn from_create_params(id: u32, _: MugCreate) -> Result<Self, MugError> { Ok(Self { id }) }
//!     fn id(&self) -> &u32 { &self.id }
//!     async fn on_update(&mut self, _: MugUpdate, _: &()) -> Result<(), MugError> { Ok(()) }
//!     async fn handle_action(&mut self, a: MugAction, _: &()) -> Result<(), MugError> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Mug>::new();
//!     mock.expect_get(1).return_ok(Some(Mug { id: 1 }));
//!     mock.expect_create().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get(1).await.unwrap().is_some());
//!     assert!(matches!(client.create(MugCreate).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Create(Result<T, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A client backed by a queue of canned replies instead of an actor.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Must be called inside a Tokio runtime; the replies are served from a task.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, _) => panic!("unexpected request: {}", request_kind(&request)),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn expect(&mut self) -> Reply<T> {
        Reply {
            expectations: self.expectations.clone(),
        }
    }

    /// The id is not checked; replies are matched by request kind and order.
    pub fn expect_get(&mut self, _id: T::Id) -> ReplyWith<T, Option<T>> {
        ReplyWith::new(self.expect(), Expectation::Get)
    }

    pub fn expect_list(&mut self) -> ReplyWith<T, Vec<T>> {
        ReplyWith::new(self.expect(), Expectation::List)
    }

    pub fn expect_create(&mut self) -> ReplyWith<T, T> {
        ReplyWith::new(self.expect(), Expectation::Create)
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ReplyWith<T, T> {
        ReplyWith::new(self.expect(), Expectation::Update)
    }

    pub fn expect_delete(&mut self, _id: T::Id) -> ReplyWith<T, ()> {
        ReplyWith::new(self.expect(), Expectation::Delete)
    }

    pub fn expect_action(&mut self, _id: T::Id) -> ReplyWith<T, T::ActionResult> {
        ReplyWith::new(self.expect(), Expectation::Action)
    }

    /// Panics if any queued reply was never requested.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
    }
}

struct Reply<T: ActorEntity> {
    expectations: Queue<T>,
}

/// Finishes an expectation with the value (or error) the mock should answer with.
pub struct ReplyWith<T: ActorEntity, R> {
    reply: Reply<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ReplyWith<T, R> {
    fn new(reply: Reply<T>, wrap: fn(Result<R, FrameworkError>) -> Expectation<T>) -> Self {
        Self { reply, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        self.reply
            .expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(response));
    }
}

/// A client plus the receiving end of its mailbox, for tests that answer requests
/// by hand and want to inspect the payloads.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action.
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
