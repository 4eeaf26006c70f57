//! # Effective State
//!
//! [`Effective<R>`] is a desired state that has passed the schema validator and the default
//! resolver. The only way to build one is [`Effective::resolve`], so a value of this type is
//! always internally consistent and safe to send to a store.

use crate::resource::ManagedResource;
use crate::validation::ValidationErrors;

/// A validated, fully-defaulted desired state.
#[derive(Debug, Clone, PartialEq)]
pub struct Effective<R>(R);

impl<R: ManagedResource> Effective<R> {
    /// Runs `validate` and then `resolve` on the desired state.
    ///
    /// Pure: touches no store and keeps no state between calls.
    pub fn resolve(desired: R) -> Result<Self, ValidationErrors> {
        desired.validate()?;
        desired.resolve().map(Self)
    }

    pub fn get(&self) -> &R {
        &self.0
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R> AsRef<R> for Effective<R> {
    fn as_ref(&self) -> &R {
        &self.0
    }
}
