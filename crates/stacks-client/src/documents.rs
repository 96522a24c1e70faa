//! Document endpoints for the Q&A side of the backend.

use serde_json::json;

use crate::error::ApiError;
use crate::models::{Document, FileUpload};
use crate::{ApiClient, file_part};

impl ApiClient {
    /// Create a document from already-extracted text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create_document(
        &self,
        filename: &str,
        content: &str,
    ) -> Result<Document, ApiError> {
        self.execute(
            self.post("/documents")
                .json(&json!({ "filename": filename, "content": content })),
        )
        .await
    }

    /// Upload a raw file; the backend extracts its text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the upload or request fails.
    pub async fn upload_document(&self, file: FileUpload) -> Result<Document, ApiError> {
        let form = reqwest::multipart::Form::new().part("file", file_part(file)?);
        self.execute(self.post("/documents/upload").multipart(form))
            .await
    }

    /// Documents owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.execute(self.get("/documents")).await
    }

    /// Fetch a single owned document.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the document is not
    /// visible to this user.
    pub async fn get_document(&self, document_id: i64) -> Result<Document, ApiError> {
        self.execute(self.get(&format!("/documents/{document_id}")))
            .await
    }
}
