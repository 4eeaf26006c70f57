//! Connection settings for the Open WebUI API.

use std::fmt;
use std::time::Duration;
use url::Url;

pub const ENDPOINT_VAR: &str = "OPENWEBUI_ENDPOINT";
pub const TOKEN_VAR: &str = "OPENWEBUI_TOKEN";
pub const TIMEOUT_VAR: &str = "OPENWEBUI_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("endpoint is required")]
    MissingEndpoint,
    #[error("token is required")]
    MissingToken,
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("invalid OPENWEBUI_TIMEOUT_SECS {value:?}: expected whole seconds")]
    InvalidTimeout { value: String },
}

/// Where the API lives and how to authenticate against it.
///
/// Built once, then passed by reference to every
/// [`HttpStore`](crate::clients::HttpStore) constructor.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub token: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: &str, token: &str) -> Result<Self, ConfigError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            endpoint,
            token: token.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a config from named settings: [`ENDPOINT_VAR`], [`TOKEN_VAR`] and the optional
    /// [`TIMEOUT_VAR`] in whole seconds.
    ///
    /// `lookup` may read the process environment directly or, as the CLI does, answer from
    /// already-parsed flags.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = lookup(ENDPOINT_VAR).unwrap_or_default();
        let token = lookup(TOKEN_VAR).unwrap_or_default();
        let config = Self::new(&endpoint, &token)?;

        match lookup(TIMEOUT_VAR) {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }

    /// Absolute URL of an API path such as `/api/v1/models/`.
    ///
    /// The endpoint may itself carry a path prefix (a reverse proxy mount point); it is kept.
    pub fn url(&self, path_and_query: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            path_and_query.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
