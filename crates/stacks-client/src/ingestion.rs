//! Ingestion-job endpoints.
//!
//! Ingestion is asynchronous server-side: starting a job returns immediately
//! with status `pending`; callers poll the job until it reaches `completed`
//! or `failed`.

use crate::ApiClient;
use crate::error::ApiError;
use crate::models::IngestionJob;

impl ApiClient {
    /// Kick off chunking + embedding for an owned document.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the document is missing or the request fails.
    pub async fn start_ingestion(&self, document_id: i64) -> Result<IngestionJob, ApiError> {
        self.execute(self.post(&format!("/ingestion/{document_id}")))
            .await
    }

    /// All ingestion jobs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_ingestion_jobs(&self) -> Result<Vec<IngestionJob>, ApiError> {
        self.execute(self.get("/ingestion/jobs")).await
    }

    /// One ingestion job, for polling.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the job does not exist or the request fails.
    pub async fn ingestion_job(&self, job_id: i64) -> Result<IngestionJob, ApiError> {
        self.execute(self.get(&format!("/ingestion/jobs/{job_id}")))
            .await
    }
}
