//! Wiring: one reconciler per resource kind, over HTTP or over in-memory remotes.

pub mod provider;

pub use provider::{HttpProvider, InMemoryProvider, InMemorySystem, Provider};
