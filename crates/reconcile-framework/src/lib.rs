//! # Reconcile Framework
//!
//! This crate provides the building blocks for keeping remote resources in line with a
//! declared desired state. It knows nothing about any particular service: a resource kind
//! plugs in by implementing [`ManagedResource`], and a service plugs in by implementing
//! [`ResourceStore`].
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Resource Layer** ([`ManagedResource`]) - schema validation, default resolution and
//!    identity access for one kind of resource.
//! 2. **Reconcile Layer** ([`Reconciler`]) - create/read/update/delete with identity
//!    preservation.
//! 3. **Store Layer** ([`ResourceStore`]) - the remote service. Production code talks HTTP;
//!    tests use the channel-backed [`ActorStore`] served by a [`ResourceActor`] or a
//!    [`MockStore`](mock::MockStore).
//!
//! You write the rules of a kind **once** in its `validate`/`resolve` hooks, and every
//! operation that sends state to the remote goes through them.
//!
//! ## Example
//!
//! ```rust
//! use reconcile_framework::validation::{require_non_empty, ValidationErrors};
//! use reconcile_framework::{known_identity, ManagedResource, Reconciler, ResourceActor};
//!
//! #[derive(Clone, Debug)]
//! struct Tag {
//!     id: Option<String>,
//!     name: Option<String>,
//! }
//!
//! impl ManagedResource for Tag {
//!     const KIND: &'static str = "tag";
//!
//!     fn identity(&self) -> Option<&str> {
//!         known_identity(&self.id)
//!     }
//!
//!     fn set_identity(&mut self, id: String) {
//!         self.id = Some(id);
//!     }
//!
//!     fn validate(&self) -> Result<(), ValidationErrors> {
//!         let mut errors = ValidationErrors::new();
//!         require_non_empty(&mut errors, "name", self.name.as_deref());
//!         errors.into_result()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, store) = ResourceActor::<Tag>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let tags = Reconciler::new(store);
//!     let created = tags
//!         .create(Tag { id: None, name: Some("prod".into()) })
//!         .await
//!         .unwrap();
//!     let read = tags.read(created.identity().unwrap()).await.unwrap();
//!     assert_eq!(read.name.as_deref(), Some("prod"));
//!
//!     // Invalid desired state never reaches the store.
//!     let err = tags.create(Tag { id: None, name: None }).await.unwrap_err();
//!     assert_eq!(err.stage(), "validation");
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - A [`Reconciler`] holds nothing but its store and may be shared across tasks.
//! - Each [`ResourceActor`] runs in its own Tokio task and handles requests **sequentially**.
//! - Different kinds are independent; the framework never orders operations across them.
//!
//! ## Testing
//!
//! The [`mock`] module scripts store responses, including the ones a real service rarely
//! produces on demand (missing identities, HTTP failures).

pub mod actor;
pub mod client;
pub mod effective;
pub mod error;
pub mod message;
pub mod mock;
pub mod reconciler;
pub mod resource;
pub mod store;
pub mod tracing;
pub mod validation;

// Re-export core types for convenience
pub use actor::{ResourceActor, ServerQuirks};
pub use client::ActorStore;
pub use effective::Effective;
pub use error::{Operation, ReconcileError, StoreError};
pub use message::{Response, StoreRequest};
pub use reconciler::{plan, preserve_identity, Reconciler};
pub use resource::{known_identity, ManagedResource};
pub use store::ResourceStore;
pub use validation::{FieldError, ValidationErrors};
