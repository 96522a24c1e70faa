//! Response-envelope normalization.
//!
//! The backend answers in more than one shape: a bare JSON value, a
//! `{ data, status, error_message? }` wrapper, or a `{ detail }` /
//! `{ error_message }` error body. [`normalize`] collapses all of them into
//! "unwrapped payload or error" so resource methods never see a wrapper.
//!
//! Shape dispatch is a single deterministic classification into [`Envelope`]
//! rather than nested runtime key checks, which keeps the precedence order
//! auditable and testable in isolation.

use serde_json::{Map, Value};
use stacks_auth::TokenStore;

use crate::error::ApiError;

const GENERIC_FAILURE: &str = "Request failed";

/// The `status` field of a wrapped envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusField {
    /// Numeric status, HTTP-style.
    Code(i64),
    /// Textual status such as `"ok"` or `"error"`.
    Text(String),
    /// Anything else (null, bool, object). Never an error marker.
    Other,
}

impl StatusField {
    fn from_value(value: &Value) -> Self {
        if let Some(code) = value.as_i64() {
            Self::Code(code)
        } else if let Some(text) = value.as_str() {
            Self::Text(text.to_string())
        } else {
            Self::Other
        }
    }

    /// Whether this status marks the envelope as an error: a numeric status
    /// of 400 or above, or the text `"error"` in any casing.
    #[must_use]
    pub fn is_error(&self) -> bool {
        match self {
            Self::Code(code) => *code >= 400,
            Self::Text(text) => text.eq_ignore_ascii_case("error"),
            Self::Other => false,
        }
    }
}

/// Classified response body. Exactly one interpretation path per body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `{ data, status, error_message? }` — the wrapper convention.
    Wrapped {
        data: Value,
        status: StatusField,
        error_message: Option<String>,
    },
    /// `{ data, ... }` with no `status` key.
    DataOnly(Value),
    /// Anything else — the body itself is the payload.
    Bare(Value),
}

impl Envelope {
    /// Classify a parsed body by the presence of `data` and `status` keys.
    /// Ambiguous shapes fall back to [`Envelope::Bare`].
    #[must_use]
    pub fn classify(body: Value) -> Self {
        match body {
            Value::Object(mut map)
                if map.contains_key("data") && map.contains_key("status") =>
            {
                let data = map.remove("data").unwrap_or(Value::Null);
                let status = StatusField::from_value(map.get("status").unwrap_or(&Value::Null));
                // An empty error_message is no error_message.
                let error_message = map
                    .get("error_message")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned);
                Self::Wrapped {
                    data,
                    status,
                    error_message,
                }
            }
            Value::Object(mut map) if map.contains_key("data") => {
                Self::DataOnly(map.remove("data").unwrap_or(Value::Null))
            }
            other => Self::Bare(other),
        }
    }
}

/// Extract the best human-readable message from an error body.
///
/// Precedence: top-level `error_message` → top-level `detail` →
/// `data.error_message` → `"Request failed"`. Empty strings do not count.
fn error_message(body: &Value) -> String {
    let candidate = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };
    candidate(body.get("error_message"))
        .or_else(|| candidate(body.get("detail")))
        .or_else(|| candidate(body.get("data").and_then(|d| d.get("error_message"))))
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

/// Interpret a completed HTTP response into an unwrapped payload or an error.
///
/// - **401** clears the persisted token through `store` before anything else;
///   the session is no longer valid regardless of what the body says.
/// - **Non-2xx** bodies are parsed as JSON (substituting a generic error body
///   on parse failure) and reported as [`ApiError::Api`] with the extracted
///   message.
/// - **204** yields an empty object; the body is never parsed.
/// - **2xx** bodies are classified via [`Envelope::classify`]: wrapped
///   envelopes either error out or unwrap to their `data`, `data`-only
///   objects unwrap, and bare values pass through unchanged.
///
/// Callers always receive the domain payload, never a wrapper object.
///
/// # Errors
///
/// [`ApiError::Http`] on body-read failure or when a 2xx body is not valid
/// JSON, [`ApiError::Api`] for non-success statuses, [`ApiError::Application`]
/// for error-marked envelopes.
pub async fn normalize(
    resp: reqwest::Response,
    store: &dyn TokenStore,
) -> Result<Value, ApiError> {
    let status = resp.status();

    // An unauthorized response invalidates the stored session before any
    // body interpretation. The error still surfaces below so the caller can
    // decide whether to redirect to login.
    if status == reqwest::StatusCode::UNAUTHORIZED {
        if let Err(error) = store.set(None) {
            tracing::warn!(%error, "failed to clear stored token after 401");
        }
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let parsed: Value = serde_json::from_str(&body).unwrap_or_else(|_| {
            serde_json::json!({ "error_message": GENERIC_FAILURE })
        });
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: error_message(&parsed),
        });
    }

    if status == reqwest::StatusCode::NO_CONTENT {
        return Ok(Value::Object(Map::new()));
    }

    let body: Value = resp.json().await?;
    match Envelope::classify(body) {
        Envelope::Wrapped {
            data,
            status,
            error_message,
        } => {
            // An explicit error_message wins even alongside a success status.
            if let Some(message) = error_message {
                Err(ApiError::Application(message))
            } else if status.is_error() {
                Err(ApiError::Application(GENERIC_FAILURE.to_string()))
            } else {
                Ok(data)
            }
        }
        Envelope::DataOnly(data) => Ok(data),
        Envelope::Bare(value) => Ok(value),
    }
}
