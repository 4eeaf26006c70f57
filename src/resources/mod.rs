//! [`ManagedResource`](reconcile_framework::ManagedResource) implementations for the Open WebUI
//! kinds: what each one requires and how its unset attributes are defaulted.

pub mod access;
pub mod group;
pub mod knowledge;
pub mod model;
pub mod user;

pub use access::resolve_access_control;
