//! Question-answering and summary endpoints.

use serde_json::json;

use crate::ApiClient;
use crate::error::ApiError;
use crate::models::{Answer, Summary};

impl ApiClient {
    /// Ask a question over the user's ingested documents.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if no documents are ingested or the request fails.
    pub async fn ask(&self, question: &str) -> Result<Answer, ApiError> {
        self.execute(self.post("/qa").json(&json!({ "question": question })))
            .await
    }

    /// Generate a summary for arbitrary content.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn generate_summary(&self, content: &str) -> Result<Summary, ApiError> {
        self.execute(
            self.post("/generate-summary")
                .json(&json!({ "content": content })),
        )
        .await
    }
}
