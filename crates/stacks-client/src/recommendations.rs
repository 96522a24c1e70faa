//! Recommendation endpoints.

use crate::ApiClient;
use crate::error::ApiError;
use crate::models::Book;

impl ApiClient {
    /// Recommended books for the signed-in user. With `book_id`, similar
    /// titles to that book; otherwise preference-driven picks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn recommendations(
        &self,
        book_id: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Book>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(book_id) = book_id {
            query.push(("book_id", book_id.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.execute(self.get("/recommendations").query(&query)).await
    }
}
