//! # Reconciliation Errors
//!
//! This module defines the error types shared by every store and reconciler.
//!
//! - [`StoreError`] is what a [`ResourceStore`](crate::ResourceStore) boundary reports.
//! - [`ReconcileError`] is what callers of the [`Reconciler`](crate::Reconciler) see. Its variant
//!   tells which stage failed: validation/defaulting, identity, or the remote call.

use crate::validation::ValidationErrors;
use std::fmt;

/// The lifecycle operation being performed, used to give remote errors context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    List,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::List => "list",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}

/// Errors surfaced by a remote resource store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Resource already exists: {0}")]
    Conflict(String),
    #[error("Remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
}

/// Errors returned to the caller of a reconciliation operation.
///
/// Nothing is retried or swallowed; the caller decides what to do.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// The desired state failed schema validation or default resolution.
    /// No remote call was made.
    #[error("invalid {kind} configuration: {errors}")]
    Validation {
        kind: &'static str,
        errors: ValidationErrors,
    },

    /// The remote accepted a create but returned nothing addressable.
    /// The resource must be treated as not created.
    #[error("{kind} creation did not yield an identity")]
    Identity { kind: &'static str },

    /// The store failed.
    #[error("error during {operation} of {kind} {}: {source}", .id.as_deref().unwrap_or("<new>"))]
    Remote {
        kind: &'static str,
        operation: Operation,
        id: Option<String>,
        #[source]
        source: StoreError,
    },
}

impl ReconcileError {
    /// Which stage of reconciliation failed.
    pub fn stage(&self) -> &'static str {
        match self {
            ReconcileError::Validation { .. } => "validation",
            ReconcileError::Identity { .. } => "identity",
            ReconcileError::Remote { .. } => "remote",
        }
    }

    /// `true` when the store reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ReconcileError::Remote {
                source: StoreError::NotFound(_),
                ..
            }
        )
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ReconcileError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_carries_context() {
        let err = ReconcileError::Remote {
            kind: "model",
            operation: Operation::Update,
            id: Some("m-1".to_string()),
            source: StoreError::Status {
                status: 500,
                body: "boom".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "error during update of model m-1: Remote returned HTTP 500: boom"
        );
        assert_eq!(err.stage(), "remote");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_detection() {
        let err = ReconcileError::Remote {
            kind: "group",
            operation: Operation::Read,
            id: Some("g-1".to_string()),
            source: StoreError::NotFound("g-1".to_string()),
        };
        assert!(err.is_not_found());
    }
}
