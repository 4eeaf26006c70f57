//! # Mock Store & Testing Guide
//!
//! [`MockStore<R>`] hands out an [`ActorStore<R>`] whose requests are answered from a queue of
//! expectations instead of real state. It lets you script exactly what the remote returns,
//! including the awkward cases that are hard to provoke from a live service:
//!
//! - a create that succeeds but returns no identity,
//! - a read that comes back with an empty identity,
//! - transport failures and HTTP errors.
//!
//! ## When to use Mocks vs the In-memory Remote
//!
//! | Feature | MockStore | ResourceActor |
//! |---------|-----------|---------------|
//! | **State** | None (scripted responses) | Real map of resources |
//! | **Determinism** | 100% Deterministic | Deterministic per kind |
//! | **Use Case** | Reconciler edge cases, error injection | Round-trips, lifecycle flows |
//! | **Error Injection** | Easy (`return_err`) | Only not-found / conflict |
//!
//! ## Fluent API
//!
//! ```rust,ignore
//! let mut mock = MockStore::<Model>::new();
//! mock.expect_create().return_ok(model_with_id("m-1"));
//! mock.expect_get("m-1").return_ok(model_with_id(""));
//!
//! let reconciler = Reconciler::new(mock.store());
//! // ... drive the reconciler ...
//!
//! mock.verify(); // every expectation was consumed
//! assert!(matches!(mock.calls()[0], RecordedCall::Create(_)));
//! ```
//!
//! ## Raw Channel Helpers
//!
//! Use [`create_mock_store`] to get a store and the receiving end of its channel, then pull
//! requests off with [`expect_create`], [`expect_update`] and friends to inspect exactly what was sent.

use crate::client::ActorStore;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::resource::ManagedResource;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::warn;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock store.
enum Expectation<R: ManagedResource> {
    Create {
        response: Result<R, StoreError>,
    },
    Get {
        id: String,
        response: Result<R, StoreError>,
    },
    List {
        response: Result<Vec<R>, StoreError>,
    },
    Update {
        id: String,
        response: Result<R, StoreError>,
    },
    Delete {
        id: String,
        response: Result<(), StoreError>,
    },
}

/// A request the mock store received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall<R> {
    Create(R),
    Get(String),
    List,
    Update(String, R),
    Delete(String),
}

type Shared<T> = Arc<Mutex<T>>;

fn lock<T>(shared: &Shared<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock store with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in FIFO order. A request of the wrong kind, or one
/// addressed to a different identity than expected, is answered with an error (and logged) so
/// the test fails on the returned result.
pub struct MockStore<R: ManagedResource> {
    store: ActorStore<R>,
    expectations: Shared<VecDeque<Expectation<R>>>,
    calls: Shared<Vec<RecordedCall<R>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<R: ManagedResource> Default for MockStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ManagedResource> MockStore<R> {
    /// Creates a new mock store with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<R>>(100);
        let expectations: Shared<VecDeque<Expectation<R>>> = Arc::default();
        let calls: Shared<Vec<RecordedCall<R>>> = Arc::default();
        let expectations_clone = expectations.clone();
        let calls_clone = calls.clone();

        // Spawn background task to answer requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&expectations_clone).pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Create { spec, respond_to },
                        Some(Expectation::Create { response }),
                    ) => {
                        lock(&calls_clone).push(RecordedCall::Create(spec));
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        lock(&calls_clone).push(RecordedCall::Get(id.clone()));
                        let _ = respond_to.send(checked(&id, &expected, response));
                    }
                    (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        lock(&calls_clone).push(RecordedCall::List);
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update {
                            id,
                            spec,
                            respond_to,
                        },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        lock(&calls_clone).push(RecordedCall::Update(id.clone(), spec));
                        let _ = respond_to.send(checked(&id, &expected, response));
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) => {
                        lock(&calls_clone).push(RecordedCall::Delete(id.clone()));
                        let _ = respond_to.send(checked(&id, &expected, response));
                    }
                    (request, _) => {
                        warn!(kind = R::KIND, "Unexpected request or expectation mismatch");
                        reject(request);
                    }
                }
            }
        });

        Self {
            store: ActorStore::new(sender),
            expectations,
            calls,
            _handle: handle,
        }
    }

    /// Returns the store for use in tests.
    pub fn store(&self) -> ActorStore<R> {
        self.store.clone()
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<R, R> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: impl Into<String>) -> ExpectationBuilder<R, R> {
        let id = id.into();
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<R, Vec<R>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` operation addressed to `id`.
    pub fn expect_update(&mut self, id: impl Into<String>) -> ExpectationBuilder<R, R> {
        let id = id.into();
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: impl Into<String>) -> ExpectationBuilder<R, ()> {
        let id = id.into();
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Every request received so far.
    pub fn calls(&self) -> Vec<RecordedCall<R>> {
        lock(&self.calls).clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<T>(
        &mut self,
        make: impl FnOnce(Result<T, StoreError>) -> Expectation<R> + Send + 'static,
    ) -> ExpectationBuilder<R, T> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

fn checked<T>(id: &str, expected: &str, response: Result<T, StoreError>) -> Result<T, StoreError> {
    if id == expected {
        response
    } else {
        warn!(%id, %expected, "Request addressed to unexpected identity");
        Err(StoreError::NotFound(id.to_owned()))
    }
}

fn reject<R: ManagedResource>(request: StoreRequest<R>) {
    fn send<T>(respond_to: Response<T>) {
        let _ = respond_to.send(Err(StoreError::Status {
            status: 500,
            body: "unexpected request".to_owned(),
        }));
    }
    match request {
        StoreRequest::Create { respond_to, .. } => send(respond_to),
        StoreRequest::Get { respond_to, .. } => send(respond_to),
        StoreRequest::List { respond_to } => send(respond_to),
        StoreRequest::Update { respond_to, .. } => send(respond_to),
        StoreRequest::Delete { respond_to, .. } => send(respond_to),
    }
}

/// Builder that queues the response for one expected request.
pub struct ExpectationBuilder<R: ManagedResource, T> {
    make: Box<dyn FnOnce(Result<T, StoreError>) -> Expectation<R> + Send>,
    expectations: Shared<VecDeque<Expectation<R>>>,
}

impl<R: ManagedResource, T> ExpectationBuilder<R, T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        lock(&self.expectations).push_back((self.make)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        lock(&self.expectations).push_back((self.make)(Err(error)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a store and the receiver its requests arrive on.
///
/// Nothing answers the requests until the test does, which makes it possible to assert on
/// the exact payload the reconciler sent before choosing a response.
pub fn create_mock_store<R: ManagedResource>(
    buffer_size: usize,
) -> (ActorStore<R>, mpsc::Receiver<StoreRequest<R>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ActorStore::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<R: ManagedResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<R>>,
) -> Option<(R, Response<R>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { spec, respond_to }) => Some((spec, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<R: ManagedResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<R>>,
) -> Option<(String, Response<R>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<R: ManagedResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<R>>,
) -> Option<(String, R, Response<R>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update {
            id,
            spec,
            respond_to,
        }) => Some((id, spec, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<R: ManagedResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<R>>,
) -> Option<(String, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::known_identity;
    use crate::store::ResourceStore;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: Option<String>,
        body: String,
    }

    impl ManagedResource for Note {
        const KIND: &'static str = "note";

        fn identity(&self) -> Option<&str> {
            known_identity(&self.id)
        }

        fn set_identity(&mut self, id: String) {
            self.id = Some(id);
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: Some(id.to_string()),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_store_channel_helpers() {
        let (store, mut receiver) = create_mock_store::<Note>(10);

        let create_task = tokio::spawn(async move { store.create(note("", "hello")).await });

        let (spec, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(spec.body, "hello");
        responder.send(Ok(note("note_1", "hello"))).unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.identity(), Some("note_1"));
    }

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mut mock = MockStore::<Note>::new();
        mock.expect_create().return_ok(note("note_1", "hello"));
        mock.expect_get("note_1").return_ok(note("note_1", "hello"));
        mock.expect_delete("note_1").return_ok(());

        let store = mock.store();
        store.create(note("", "hello")).await.unwrap();
        let fetched = store.get("note_1").await.unwrap();
        assert_eq!(fetched.body, "hello");
        store.delete("note_1").await.unwrap();

        mock.verify();
        assert_eq!(
            mock.calls(),
            vec![
                RecordedCall::Create(note("", "hello")),
                RecordedCall::Get("note_1".to_string()),
                RecordedCall::Delete("note_1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_store_rejects_unexpected_identity() {
        let mut mock = MockStore::<Note>::new();
        mock.expect_get("note_1").return_ok(note("note_1", "hello"));

        let result = mock.store().get("note_2").await;
        assert_eq!(result, Err(StoreError::NotFound("note_2".to_string())));
    }

    #[tokio::test]
    async fn test_mock_store_rejects_unexpected_request() {
        let mock = MockStore::<Note>::new();
        let result = mock.store().list().await;
        assert!(matches!(result, Err(StoreError::Status { status: 500, .. })));
    }
}
