//! # ResourceStore Trait
//!
//! The typed capability set a remote service exposes for one resource kind:
//! `{create, get, list, update, delete}`.
//!
//! A store is injected into a [`Reconciler`](crate::Reconciler) at construction time. Retries,
//! authentication and serialization belong to the store implementation; the reconciler only
//! sees results and [`StoreError`]s.
use crate::error::StoreError;
use crate::resource::ManagedResource;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote store for one resource kind.
///
/// # Example
///
/// ```rust,ignore
/// struct ModelsApi { /* http client */ }
///
/// #[async_trait]
/// impl ResourceStore<Model> for ModelsApi {
///     async fn create(&self, spec: Model) -> Result<Model, StoreError> { /* POST */ }
///     async fn get(&self, id: &str) -> Result<Model, StoreError> { /* GET */ }
///     async fn list(&self) -> Result<Vec<Model>, StoreError> { /* GET */ }
///     async fn update(&self, id: &str, spec: Model) -> Result<Model, StoreError> { /* POST */ }
///     async fn delete(&self, id: &str) -> Result<(), StoreError> { /* DELETE */ }
/// }
///
/// let reconciler = Reconciler::new(ModelsApi { /* ... */ });
/// ```
#[async_trait]
pub trait ResourceStore<R: ManagedResource>: Send + Sync {
    /// Create a resource from its effective state and return what the remote stored.
    async fn create(&self, spec: R) -> Result<R, StoreError>;

    /// Fetch a resource by identity.
    async fn get(&self, id: &str) -> Result<R, StoreError>;

    /// Fetch every resource of this kind visible to the caller.
    async fn list(&self) -> Result<Vec<R>, StoreError>;

    /// Replace the resource addressed by `id` with `spec`.
    async fn update(&self, id: &str, spec: R) -> Result<R, StoreError>;

    /// Remove the resource addressed by `id`.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<R, S> ResourceStore<R> for Arc<S>
where
    R: ManagedResource,
    S: ResourceStore<R> + ?Sized,
{
    async fn create(&self, spec: R) -> Result<R, StoreError> {
        (**self).create(spec).await
    }

    async fn get(&self, id: &str) -> Result<R, StoreError> {
        (**self).get(id).await
    }

    async fn list(&self) -> Result<Vec<R>, StoreError> {
        (**self).list().await
    }

    async fn update(&self, id: &str, spec: R) -> Result<R, StoreError> {
        (**self).update(id, spec).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
