//! Review endpoints.

use serde_json::json;

use crate::ApiClient;
use crate::error::ApiError;
use crate::models::Review;

impl ApiClient {
    /// All reviews for a book.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_reviews(&self, book_id: i64) -> Result<Vec<Review>, ApiError> {
        self.execute(self.get(&format!("/books/{book_id}/reviews")))
            .await
    }

    /// Add a review. The backend enforces rating 1–5 and a minimum text
    /// length; violations come back as normalized API errors.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation or the request fails.
    pub async fn add_review(
        &self,
        book_id: i64,
        review_text: &str,
        rating: i32,
    ) -> Result<Review, ApiError> {
        self.execute(
            self.post(&format!("/books/{book_id}/reviews"))
                .json(&json!({ "review_text": review_text, "rating": rating })),
        )
        .await
    }
}
