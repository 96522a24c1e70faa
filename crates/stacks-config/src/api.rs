//! Backend API endpoint configuration.

use serde::{Deserialize, Serialize};

/// Local-development backend, matching the server's default bind.
fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

/// Request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL prepended to every request path. Read once at client
    /// construction; not mutable at runtime.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout applied by the HTTP client.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Whether the base URL still points at the local-development default.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.base_url.starts_with("http://localhost") || self.base_url.starts_with("http://127.")
    }
}
