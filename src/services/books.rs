//! Book catalog service

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Search books
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    /// Create a new book
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Verify borrower exists when provided
        if let Some(borrower_id) = book.borrower_id {
            self.repository.members.get_by_id(borrower_id).await?;
        }

        self.repository.books.create(&book, Utc::now()).await
    }

    /// Update an existing book
    pub async fn update(&self, id: Uuid, book: UpdateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Verify borrower exists when set to a member
        if let Some(Some(borrower_id)) = book.borrower_id {
            self.repository.members.get_by_id(borrower_id).await?;
        }

        self.repository.books.update(id, &book, Utc::now()).await
    }

    /// Delete a book; transactions referencing it go with it
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
