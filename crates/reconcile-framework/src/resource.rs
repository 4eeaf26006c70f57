//! # ManagedResource Trait
//!
//! The `ManagedResource` trait is the contract every remote resource kind (model, knowledge base,
//! group, user, ...) implements so the generic [`Reconciler`](crate::Reconciler) can drive it through
//! Create/Read/Update/Delete without knowing its fields.
//!
//! # Architecture Note
//! The reconciler only ever needs three things from a resource:
//! - its **kind** (for logs, errors and generated identities),
//! - its **identity** (read and overwrite, nothing more),
//! - its **plan-time hooks** (`validate` and `resolve`).
//!
//! Everything else is opaque payload that travels verbatim to and from the store.
//!
//! # Provided Methods (Hooks)
//! - [`ManagedResource::validate`] - schema checks (required fields, enumerations).
//! - [`ManagedResource::resolve`] - conditional defaulting into an effective state.
//!
//! Both default to accepting the value unchanged.

use crate::validation::ValidationErrors;
use std::fmt::Debug;

/// Trait that any resource kind must implement to be reconciled.
///
/// # Identity
/// An identity is "known" only when it is present *and* non-empty. Remote responses are allowed
/// to come back with `""` or `null` in the identity field; [`ManagedResource::identity`] must
/// report those as `None` so the reconciler can restore the known identity.
pub trait ManagedResource: Clone + Debug + Send + Sync + 'static {
    /// Short kind name (e.g. `"model"`). Used in log fields, errors and generated ids.
    const KIND: &'static str;

    /// The usable identity of this resource, if any.
    fn identity(&self) -> Option<&str>;

    /// Overwrite the identity.
    fn set_identity(&mut self, id: String);

    /// Schema checks on the desired state. Must be pure and must not look across fields.
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// Conditional defaulting. Turns a validated desired state into the state that is sent
    /// to the store, or rejects a combination of fields that can never be valid.
    fn resolve(self) -> Result<Self, ValidationErrors> {
        Ok(self)
    }
}

/// Returns the identity stored in an optional field, treating `""` as absent.
pub fn known_identity(id: &Option<String>) -> Option<&str> {
    id.as_deref().filter(|id| !id.is_empty())
}
