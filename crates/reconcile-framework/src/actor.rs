//! # In-memory Remote
//!
//! This module defines the `ResourceActor`, an in-memory stand-in for the remote service. It
//! implements the "Server" side of the Actor Model: it owns the resource map and processes
//! [`StoreRequest`]s sequentially, so the map needs no locking.
//!
//! It is used by the integration tests and by the in-memory provider to exercise the full
//! reconciliation path without a network.

use crate::client::ActorStore;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::resource::ManagedResource;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Behaviour of the real service that the in-memory remote can reproduce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerQuirks {
    /// Respond to get/update with an empty identity, as some API versions do.
    pub blank_identity_on_read: bool,
}

/// The generic in-memory remote for one resource kind.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and its
///     [`ActorStore`] (client).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Reconcile**: Hand the store to a [`Reconciler`](crate::Reconciler).
///
/// ```rust,ignore
/// let (actor, store) = ResourceActor::<Model>::new(32);
/// tokio::spawn(actor.run());
///
/// let reconciler = Reconciler::new(store);
/// ```
///
/// # Operations
///
/// * **Create**: keeps the caller's identity when it has one, otherwise assigns
///   `"{kind}_{n}"`. An identity that is already taken is a [`StoreError::Conflict`].
/// * **Get / Update / Delete**: [`StoreError::NotFound`] for unknown identities. Update stores
///   the spec under the addressed identity regardless of the identity inside the spec.
/// * **List**: every stored resource, ordered by identity.
pub struct ResourceActor<R: ManagedResource> {
    receiver: mpsc::Receiver<StoreRequest<R>>,
    store: HashMap<String, R>,
    next_id: u32,
    quirks: ServerQuirks,
}

impl<R: ManagedResource> ResourceActor<R> {
    /// Creates a new `ResourceActor` and its associated [`ActorStore`].
    ///
    /// `buffer_size` is the capacity of the mpsc channel. When it is full, store calls wait.
    pub fn new(buffer_size: usize) -> (Self, ActorStore<R>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            quirks: ServerQuirks::default(),
        };
        (actor, ActorStore::new(sender))
    }

    pub fn with_quirks(mut self, quirks: ServerQuirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Runs the actor's event loop until every [`ActorStore`] clone has been dropped.
    pub async fn run(mut self) {
        let kind = R::KIND;
        info!(kind, "Remote started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { mut spec, respond_to } => {
                    debug!(kind, ?spec, "Create");
                    let id = match spec.identity() {
                        Some(id) => id.to_owned(),
                        None => self.next_identity(),
                    };
                    if self.store.contains_key(&id) {
                        warn!(kind, %id, "Already exists");
                        let _ = respond_to.send(Err(StoreError::Conflict(id)));
                        continue;
                    }
                    spec.set_identity(id.clone());
                    self.store.insert(id.clone(), spec.clone());
                    info!(kind, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(spec));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(kind, %id, found = item.is_some(), "Get");
                    let result = match item {
                        Some(item) => Ok(self.present(item)),
                        None => Err(StoreError::NotFound(id)),
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::List { respond_to } => {
                    let mut items: Vec<R> = self.store.values().cloned().collect();
                    items.sort_by(|a, b| a.identity().cmp(&b.identity()));
                    debug!(kind, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::Update {
                    id,
                    mut spec,
                    respond_to,
                } => {
                    debug!(kind, %id, ?spec, "Update");
                    if !self.store.contains_key(&id) {
                        warn!(kind, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id)));
                        continue;
                    }
                    spec.set_identity(id.clone());
                    self.store.insert(id.clone(), spec.clone());
                    info!(kind, %id, "Updated");
                    let _ = respond_to.send(Ok(self.present(spec)));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(kind, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        info!(kind, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(kind, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id)));
                    }
                }
            }
        }

        info!(kind, size = self.store.len(), "Shutdown");
    }

    fn next_identity(&mut self) -> String {
        let id = format!("{}_{}", R::KIND, self.next_id);
        self.next_id += 1;
        id
    }

    fn present(&self, mut item: R) -> R {
        if self.quirks.blank_identity_on_read {
            item.set_identity(String::new());
        }
        item
    }
}
