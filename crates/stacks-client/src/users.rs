//! Per-user preference endpoints.

use serde_json::json;

use crate::ApiClient;
use crate::error::ApiError;
use crate::models::Preferences;

impl ApiClient {
    /// Fetch the signed-in user's preference map.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn preferences(&self) -> Result<Preferences, ApiError> {
        self.execute(self.get("/users/me/preferences")).await
    }

    /// Replace the preference map wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update_preferences(
        &self,
        preferences: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Preferences, ApiError> {
        self.execute(
            self.put("/users/me/preferences")
                .json(&json!({ "preferences": preferences })),
        )
        .await
    }
}
