//! Transport to the Open WebUI API.

pub mod endpoints;
pub mod http;

pub use endpoints::Endpoints;
pub use http::{build_client, HttpStore};
