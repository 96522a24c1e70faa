//! # stacks-client
//!
//! Authenticated REST client for the Stacks backend.
//!
//! Composes a [`stacks_auth::TokenStore`] (bearer-token attachment, 401
//! invalidation) with the response-envelope normalizer in [`envelope`] so
//! resource methods receive unwrapped domain payloads or a classified
//! [`ApiError`] — never a raw wrapper object. Resource methods live in one
//! module per backend router (`auth`, `books`, `documents`, ...), all thin
//! typed wrappers over [`ApiClient::execute`].
//!
//! The client performs exactly one attempt per call: no retries, no explicit
//! timeout policy beyond the client-wide default, no cancellation discipline.
//! It never displays anything — errors carry a message and the caller decides
//! presentation.

pub mod envelope;
pub mod error;
pub mod models;

mod auth;
mod books;
mod documents;
mod ingestion;
mod qa;
mod recommendations;
mod reviews;
mod users;

pub use error::ApiError;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use stacks_auth::TokenStore;
use stacks_config::StacksConfig;

use crate::models::FileUpload;

/// HTTP client for the Stacks backend.
///
/// The base URL is fixed at construction. The token store is consulted at
/// request-build time and never mutated mid-request; concurrent requests are
/// independent, last store write wins.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client against `base_url` using `store` for bearer tokens.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self::with_timeout(base_url, store, Duration::from_secs(30))
    }

    /// Create a client with an explicit request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn with_timeout(
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("stacks/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.into(),
            store,
        }
    }

    /// Create a client from loaded configuration.
    #[must_use]
    pub fn from_config(config: &StacksConfig, store: Arc<dyn TokenStore>) -> Self {
        Self::with_timeout(
            config.api.base_url.clone(),
            store,
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Attach the bearer token (when present), send, normalize, deserialize.
    ///
    /// JSON bodies are set via `.json()` (which sets `Content-Type`);
    /// multipart bodies via `.multipart()` (boundary left to the transport).
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let req = match self.store.get() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await?;
        tracing::debug!(status = %resp.status(), url = %resp.url(), "api response");
        let payload = envelope::normalize(resp, self.store.as_ref()).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Like [`ApiClient::execute`] but discards the payload. Used for
    /// endpoints whose response carries nothing the caller needs (deletes,
    /// logout).
    pub(crate) async fn execute_unit(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self.execute(req).await?;
        Ok(())
    }
}

/// Build a multipart file part from an in-memory upload.
pub(crate) fn file_part(file: FileUpload) -> Result<reqwest::multipart::Part, ApiError> {
    let part = reqwest::multipart::Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)?;
    Ok(part)
}
