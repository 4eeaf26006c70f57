//! # Open WebUI Reconcile
//!
//! Declarative management of [Open WebUI](https://openwebui.com) resources: models, knowledge
//! bases, groups and users are described as JSON desired state and reconciled against a live
//! instance through its v1 REST API.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`reconcile_framework`])
//! Kind-agnostic plumbing: the [`Reconciler`](reconcile_framework::Reconciler), the
//! [`ResourceStore`](reconcile_framework::ResourceStore) seam, validation helpers and the
//! in-memory remote used in tests.
//!
//! ### 2. The Shapes ([`model`])
//! Serde structs mirroring the API payloads.
//!
//! ### 3. The Rules ([`resources`])
//! Per-kind required attributes, enumerations and defaults. The privacy rule lives in
//! [`resources::resolve_access_control`]:
//!
//! - `is_private = false` means public (`access_control: null`).
//! - `is_private = true` without grants means owner-only (all lists empty).
//! - Grants on a public model are rejected before anything is sent.
//!
//! ### 4. The Transport ([`clients`]) and Settings ([`config`])
//! [`HttpStore`](clients::HttpStore) speaks the REST API; [`ClientConfig`](config::ClientConfig)
//! holds endpoint, token and timeout.
//!
//! ### 5. The Wiring ([`lifecycle`])
//! A [`Provider`](lifecycle::Provider) bundles one reconciler per kind, either over HTTP or over
//! in-memory remotes.
//!
//! ## Quick Start
//!
//! ```bash
//! export OPENWEBUI_ENDPOINT=http://localhost:8080
//! export OPENWEBUI_TOKEN=sk-...
//!
//! openwebui-reconcile plan model research-assistant.json
//! RUST_LOG=info openwebui-reconcile create model research-assistant.json
//! ```

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod resources;

pub use config::{ClientConfig, ConfigError};
pub use lifecycle::{HttpProvider, InMemoryProvider, InMemorySystem, Provider};
