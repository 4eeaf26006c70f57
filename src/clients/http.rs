//! # HTTP Store
//!
//! [`HttpStore<R>`] implements [`ResourceStore<R>`] against the Open WebUI REST API: JSON
//! bodies, bearer-token authentication, one route table per kind (see [`Endpoints`]).

use super::endpoints::Endpoints;
use crate::config::ClientConfig;
use async_trait::async_trait;
use reconcile_framework::{ManagedResource, ResourceStore, StoreError};
use reqwest::{header, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// REST-backed store for one resource kind.
///
/// Cloning is cheap: the underlying `reqwest::Client` and the configuration are shared.
pub struct HttpStore<R> {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    _kind: PhantomData<fn() -> R>,
}

impl<R> Clone for HttpStore<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            _kind: PhantomData,
        }
    }
}

impl<R: Endpoints> fmt::Debug for HttpStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStore")
            .field("kind", &R::KIND)
            .field("config", &self.config)
            .finish()
    }
}

/// Builds the shared HTTP client with the configured timeout.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, StoreError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| StoreError::Transport(e.to_string()))
}

impl<R: Endpoints> HttpStore<R> {
    pub fn new(config: &ClientConfig) -> Result<Self, StoreError> {
        Ok(Self::with_client(build_client(config)?, config))
    }

    /// Shares an existing client, so several kinds reuse one connection pool.
    pub fn with_client(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            config: Arc::new(config.clone()),
            _kind: PhantomData,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        debug!(kind = R::KIND, %method, %url, "Request");
        self.http
            .request(method, url)
            .bearer_auth(&self.config.token)
            .header(header::ACCEPT, "application/json")
    }

    /// Sends the request and returns the decoded JSON body (`Null` when empty).
    ///
    /// `subject` names the resource in a not-found or conflict error.
    async fn send(&self, request: RequestBuilder, subject: &str) -> Result<Value, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        handle_response(response, subject).await
    }

    fn decode(value: Value) -> Result<R, StoreError> {
        serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

async fn handle_response(response: reqwest::Response, subject: &str) -> Result<Value, StoreError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| StoreError::Transport(e.to_string()))?;
    debug!(status = status.as_u16(), "Response");

    if !status.is_success() {
        warn!(status = status.as_u16(), %body, "Remote rejected request");
        return Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound(subject.to_string()),
            StatusCode::CONFLICT => StoreError::Conflict(subject.to_string()),
            _ => StoreError::Status {
                status: status.as_u16(),
                body,
            },
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl<R: Endpoints> ResourceStore<R> for HttpStore<R> {
    #[tracing::instrument(skip_all, fields(kind = R::KIND))]
    async fn create(&self, spec: R) -> Result<R, StoreError> {
        let subject = spec.identity().unwrap_or("<new>").to_string();
        let request = self.request(Method::POST, &R::create_path()).json(&spec);
        let body = self.send(request, &subject).await?;
        if body.is_null() {
            return Err(StoreError::Decode(format!(
                "empty response creating {} {subject}",
                R::KIND
            )));
        }
        Self::decode(body)
    }

    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    async fn get(&self, id: &str) -> Result<R, StoreError> {
        let request = self.request(Method::GET, &R::get_path(id));
        let body = self.send(request, id).await?;
        // Some routes answer a missing resource with 200 and `null`.
        if body.is_null() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Self::decode(body)
    }

    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    async fn list(&self) -> Result<Vec<R>, StoreError> {
        let request = self.request(Method::GET, &R::list_path());
        let body = self.send(request, R::KIND).await?;
        R::decode_list(body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    #[tracing::instrument(skip(self, spec), fields(kind = R::KIND))]
    async fn update(&self, id: &str, spec: R) -> Result<R, StoreError> {
        let request = self.request(Method::POST, &R::update_path(id)).json(&spec);
        let body = self.send(request, id).await?;
        if body.is_null() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Self::decode(body)
    }

    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let request = self.request(Method::DELETE, &R::delete_path(id));
        match self.send(request, id).await? {
            Value::Bool(false) => Err(StoreError::Status {
                status: StatusCode::OK.as_u16(),
                body: format!("{} {id} was not deleted", R::KIND),
            }),
            _ => Ok(()),
        }
    }
}
