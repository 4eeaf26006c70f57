//! # Reconciler
//!
//! The [`Reconciler`] drives one resource kind through its lifecycle against a
//! [`ResourceStore`]. Every operation is a straight line:
//!
//! ```text
//! desired --validate--> --resolve--> Effective --store--> remote result --identity--> state
//! ```
//!
//! ## Identity preservation
//!
//! The remote owns a resource's identity, but some API versions answer reads and updates with
//! an empty one. Once an identity is known it is never lost:
//!
//! * **Create** fails with [`ReconcileError::Identity`] if the remote returns none.
//! * **Read / Update** restore the known identity when the response omits it.
//! * **Update** always addresses, and sends, the known identity.
//!
//! A non-empty identity returned by the remote is trusted as-is.

use crate::effective::Effective;
use crate::error::{Operation, ReconcileError, StoreError};
use crate::resource::ManagedResource;
use crate::store::ResourceStore;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Puts `known` back on `remote` when the remote answered without an identity.
pub fn preserve_identity<R: ManagedResource>(mut remote: R, known: &str) -> R {
    if remote.identity().is_none() {
        warn!(kind = R::KIND, id = %known, "Remote omitted identity, keeping known one");
        remote.set_identity(known.to_owned());
    }
    remote
}

/// Validates and resolves `desired`. Needs no store, so it also serves offline planning.
pub fn plan<R: ManagedResource>(desired: R) -> Result<Effective<R>, ReconcileError> {
    debug!(kind = R::KIND, ?desired, "Planning");
    Effective::resolve(desired).map_err(|errors| {
        warn!(kind = R::KIND, %errors, "Desired state rejected");
        ReconcileError::Validation {
            kind: R::KIND,
            errors,
        }
    })
}

/// Reconciles desired state of one resource kind with a remote store.
///
/// Holds no state besides the injected store, so it can be cloned and shared freely.
pub struct Reconciler<R, S> {
    store: S,
    _kind: PhantomData<fn() -> R>,
}

impl<R, S: Clone> Clone for Reconciler<R, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _kind: PhantomData,
        }
    }
}

impl<R: ManagedResource, S> fmt::Debug for Reconciler<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler").field("kind", &R::KIND).finish()
    }
}

impl<R, S> Reconciler<R, S>
where
    R: ManagedResource,
    S: ResourceStore<R>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates and resolves `desired` without touching the store.
    pub fn plan(&self, desired: R) -> Result<Effective<R>, ReconcileError> {
        plan(desired)
    }

    /// Creates the resource and returns the state to record.
    #[tracing::instrument(skip_all, fields(kind = R::KIND))]
    pub async fn create(&self, desired: R) -> Result<R, ReconcileError> {
        let effective = self.plan(desired)?;
        let declared = effective.get().identity().map(str::to_owned);
        let created = self
            .store
            .create(effective.into_inner())
            .await
            .map_err(remote::<R>(Operation::Create, declared.as_deref()))?;

        match created.identity() {
            Some(id) => info!(%id, "Created"),
            None => {
                warn!("Remote returned no identity after create");
                return Err(ReconcileError::Identity { kind: R::KIND });
            }
        }
        Ok(created)
    }

    /// Refreshes the state of the resource known as `id`.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn read(&self, id: &str) -> Result<R, ReconcileError> {
        let remote_state = self
            .store
            .get(id)
            .await
            .map_err(remote::<R>(Operation::Read, Some(id)))?;
        debug!("Read");
        Ok(preserve_identity(remote_state, id))
    }

    /// Applies `desired` to the resource known as `id`.
    ///
    /// Whatever identity `desired` carries, or lacks, is replaced by `id` before validation.
    #[tracing::instrument(skip(self, desired), fields(kind = R::KIND))]
    pub async fn update(&self, id: &str, mut desired: R) -> Result<R, ReconcileError> {
        desired.set_identity(id.to_owned());
        let spec = self.plan(desired)?.into_inner();

        let updated = self
            .store
            .update(id, spec)
            .await
            .map_err(remote::<R>(Operation::Update, Some(id)))?;
        info!("Updated");
        Ok(preserve_identity(updated, id))
    }

    /// Removes the resource known as `id`.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn delete(&self, id: &str) -> Result<(), ReconcileError> {
        self.store
            .delete(id)
            .await
            .map_err(remote::<R>(Operation::Delete, Some(id)))?;
        info!("Deleted");
        Ok(())
    }

    /// Every resource of this kind the remote reports, unchanged.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn list(&self) -> Result<Vec<R>, ReconcileError> {
        let items = self
            .store
            .list()
            .await
            .map_err(remote::<R>(Operation::List, None))?;
        debug!(size = items.len(), "Listed");
        Ok(items)
    }
}

fn remote<R: ManagedResource>(
    operation: Operation,
    id: Option<&str>,
) -> impl FnOnce(StoreError) -> ReconcileError {
    let id = id.map(str::to_owned);
    move |source| ReconcileError::Remote {
        kind: R::KIND,
        operation,
        id,
        source,
    }
}
