//! # Channel-backed Store Client
//!
//! This module defines [`ActorStore`], the client half of the in-memory remote.

use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::resource::ManagedResource;
use crate::store::ResourceStore;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// ## ActorStore
///
/// A [`ResourceStore`] that forwards every operation over a Tokio mpsc channel and waits for the
/// answer on a oneshot channel. The other end is a [`ResourceActor`](crate::ResourceActor) or a
/// [`MockStore`](crate::mock::MockStore).
///
/// * **Cloneable** - holds only a sender, so cloning is inexpensive.
/// * **Closed channel** - reported as [`StoreError::Closed`] / [`StoreError::Dropped`].
#[derive(Clone)]
pub struct ActorStore<R: ManagedResource> {
    sender: mpsc::Sender<StoreRequest<R>>,
}

impl<R: ManagedResource> ActorStore<R> {
    pub fn new(sender: mpsc::Sender<StoreRequest<R>>) -> Self {
        Self { sender }
    }

    async fn call<T>(
        &self,
        request: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest<R>,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

#[async_trait]
impl<R: ManagedResource> ResourceStore<R> for ActorStore<R> {
    async fn create(&self, spec: R) -> Result<R, StoreError> {
        self.call(|respond_to| StoreRequest::Create { spec, respond_to })
            .await
    }

    async fn get(&self, id: &str) -> Result<R, StoreError> {
        let id = id.to_owned();
        self.call(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    async fn list(&self) -> Result<Vec<R>, StoreError> {
        self.call(|respond_to| StoreRequest::List { respond_to }).await
    }

    async fn update(&self, id: &str, spec: R) -> Result<R, StoreError> {
        let id = id.to_owned();
        self.call(|respond_to| StoreRequest::Update {
            id,
            spec,
            respond_to,
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = id.to_owned();
        self.call(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }
}
