//! Client error types.

use thiserror::Error;

/// Errors surfaced by [`crate::ApiClient`] requests.
///
/// The client never logs-and-swallows and never displays: every failure is
/// returned as one of these variants carrying the best available
/// human-readable message, and the calling layer decides presentation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (network unreachable, DNS, timeout). Passed
    /// through from the transport without further classification.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success HTTP status. A 401 lands here too,
    /// after the stored token has been cleared as a side effect.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// A success-shaped envelope carried an error indicator.
    #[error("{0}")]
    Application(String),

    /// The normalized payload did not match the expected typed model.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The human-readable message this error carries.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Http(e) => e.to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Application(message) => message.clone(),
            Self::Decode(e) => e.to_string(),
        }
    }

    /// Whether this is an authentication failure (HTTP 401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}
