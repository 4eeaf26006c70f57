//! # Store Messages
//!
//! Message types exchanged between an [`ActorStore`](crate::ActorStore) (the client half) and
//! whatever serves its channel: a [`ResourceActor`](crate::ResourceActor) or a
//! [`MockStore`](crate::mock::MockStore).

use crate::error::StoreError;
use crate::resource::ManagedResource;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by store servers.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// One request per [`ResourceStore`](crate::ResourceStore) operation.
///
/// Identities travel as owned `String`s because the request outlives the caller's borrow.
#[derive(Debug)]
pub enum StoreRequest<R: ManagedResource> {
    Create {
        spec: R,
        respond_to: Response<R>,
    },
    Get {
        id: String,
        respond_to: Response<R>,
    },
    List {
        respond_to: Response<Vec<R>>,
    },
    Update {
        id: String,
        spec: R,
        respond_to: Response<R>,
    },
    Delete {
        id: String,
        respond_to: Response<()>,
    },
}
