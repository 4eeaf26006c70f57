//! # Logging Setup
//!
//! Every reconciler operation runs inside a span carrying the resource `kind`, and the
//! in-memory remote logs each request it serves. [`setup_tracing`] installs a subscriber that
//! prints those events.
//!
//! ```bash
//! # Operation outcomes only
//! RUST_LOG=info openwebui-reconcile read model m-1
//!
//! # Full desired state and remote payloads
//! RUST_LOG=debug openwebui-reconcile plan model desired.json
//! ```
//!
//! With `RUST_LOG=info` a read that had to restore an identity looks like:
//!
//! ```text
//! WARN read{kind="model" id="m-1"}: Remote omitted identity, keeping known one kind="model" id=m-1
//! ```

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG`.
///
/// Logs go to stderr so command output on stdout stays machine-readable. Calling this twice
/// panics, like any global subscriber initialisation.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false) // kind field already says where a line came from
        .compact()
        .init();
}
