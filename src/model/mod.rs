//! Wire shapes of the Open WebUI resources, as sent to and returned by the v1 API.
//!
//! Plain serde structs with no behaviour. The rules each kind obeys (required fields, defaults,
//! privacy) are implemented in [`crate::resources`].

pub mod access;
pub mod ai_model;
pub mod group;
pub mod knowledge;
pub mod user;

pub use access::*;
pub use ai_model::*;
pub use group::*;
pub use knowledge::*;
pub use user::*;
