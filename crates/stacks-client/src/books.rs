//! Book catalog endpoints: CRUD with file upload, borrow/return, analysis.

use crate::error::ApiError;
use crate::models::{
    Book, BookAnalysis, BookPage, BookUpdate, BorrowRecord, BorrowStatus, FileUpload, NewBook,
};
use crate::{ApiClient, file_part};

impl ApiClient {
    /// One page of the catalog. The backend clamps `size` to 50.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_books(&self, page: u32, size: u32) -> Result<BookPage, ApiError> {
        self.execute(self.get("/books").query(&[("page", page), ("size", size)]))
            .await
    }

    /// Fetch a single book.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the book does not exist.
    pub async fn get_book(&self, book_id: i64) -> Result<Book, ApiError> {
        self.execute(self.get(&format!("/books/{book_id}"))).await
    }

    /// Create a book. The metadata travels as multipart form fields alongside
    /// the file; the transport sets the multipart boundary itself.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the upload or request fails.
    pub async fn create_book(&self, book: &NewBook, file: FileUpload) -> Result<Book, ApiError> {
        let form = reqwest::multipart::Form::new()
            .text("title", book.title.clone())
            .text("author", book.author.clone())
            .text("genre", book.genre.clone())
            .text("year_published", book.year_published.to_string())
            .part("file", file_part(file)?);
        self.execute(self.post("/books").multipart(form)).await
    }

    /// Update book metadata without touching the stored file. `None` fields
    /// are omitted from the JSON body and left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update_book(&self, book_id: i64, update: &BookUpdate) -> Result<Book, ApiError> {
        self.execute(self.put(&format!("/books/{book_id}")).json(update))
            .await
    }

    /// Replace book metadata and file in one multipart request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the upload or request fails.
    pub async fn update_book_with_file(
        &self,
        book_id: i64,
        book: &NewBook,
        file: FileUpload,
    ) -> Result<Book, ApiError> {
        let form = reqwest::multipart::Form::new()
            .text("title", book.title.clone())
            .text("author", book.author.clone())
            .text("genre", book.genre.clone())
            .text("year_published", book.year_published.to_string())
            .part("file", file_part(file)?);
        self.execute(self.put(&format!("/books/{book_id}")).multipart(form))
            .await
    }

    /// Delete a book and its stored file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_book(&self, book_id: i64) -> Result<(), ApiError> {
        self.execute_unit(self.delete(&format!("/books/{book_id}")))
            .await
    }

    /// Remove only the uploaded file, keeping the catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_book_file(&self, book_id: i64) -> Result<(), ApiError> {
        self.execute_unit(self.delete(&format!("/books/{book_id}/file")))
            .await
    }

    /// Borrow a book for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the book is unavailable or the request fails.
    pub async fn borrow_book(&self, book_id: i64) -> Result<BorrowRecord, ApiError> {
        self.execute(self.post(&format!("/books/{book_id}/borrow")))
            .await
    }

    /// Return a previously borrowed book.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn return_book(&self, book_id: i64) -> Result<BorrowRecord, ApiError> {
        self.execute(self.post(&format!("/books/{book_id}/return")))
            .await
    }

    /// Whether the signed-in user currently has this book out.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn borrow_status(&self, book_id: i64) -> Result<BorrowStatus, ApiError> {
        self.execute(self.get(&format!("/books/{book_id}/borrow-status")))
            .await
    }

    /// AI-derived summary and review digest for a book.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn book_analysis(&self, book_id: i64) -> Result<BookAnalysis, ApiError> {
        self.execute(self.get(&format!("/books/{book_id}/analysis")))
            .await
    }
}
