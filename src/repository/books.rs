//! Books repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookStatus, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Search books with pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(20);
        let offset = (page - 1) * per_page;

        let title_filter = query.title.as_ref().map(|t| format!("%{}%", t.to_lowercase()));
        let author_filter = query.author.as_ref().map(|a| format!("%{}%", a.to_lowercase()));
        let genre_filter = query.genre.as_ref().map(|g| g.to_lowercase());
        let status_filter = query.status.map(|s| s.as_code().to_string());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM books
            WHERE ($1::text IS NULL OR LOWER(title) LIKE $1)
              AND ($2::text IS NULL OR LOWER(author) LIKE $2)
              AND ($3::text IS NULL OR LOWER(genre) = $3)
              AND ($4::text IS NULL OR status = $4)
            "#,
        )
        .bind(&title_filter)
        .bind(&author_filter)
        .bind(&genre_filter)
        .bind(&status_filter)
        .fetch_one(&self.pool)
        .await?;

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE ($1::text IS NULL OR LOWER(title) LIKE $1)
              AND ($2::text IS NULL OR LOWER(author) LIKE $2)
              AND ($3::text IS NULL OR LOWER(genre) = $3)
              AND ($4::text IS NULL OR status = $4)
            ORDER BY title
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(&title_filter)
        .bind(&author_filter)
        .bind(&genre_filter)
        .bind(&status_filter)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((books, total))
    }

    /// Books currently held by a member
    pub async fn find_by_borrower(&self, member_id: Uuid) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE borrower_id = $1 ORDER BY title",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook, now: DateTime<Utc>) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, year, genre, summary, date_added,
                               date_updated, status, cost, borrower_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.year)
        .bind(&book.genre)
        .bind(book.summary.clone().unwrap_or_default())
        .bind(now)
        .bind(book.status.unwrap_or_default())
        .bind(book.cost)
        .bind(book.borrower_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing book, stamping date_updated
    pub async fn update(&self, id: Uuid, book: &UpdateBook, now: DateTime<Utc>) -> AppResult<Book> {
        let existing = self.get_by_id(id).await?;

        let borrower_id = match book.borrower_id {
            Some(borrower) => borrower,
            None => existing.borrower_id,
        };

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author = $3, isbn = $4, year = $5, genre = $6, summary = $7,
                status = $8, cost = $9, borrower_id = $10, date_updated = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(book.title.clone().unwrap_or(existing.title))
        .bind(book.author.clone().unwrap_or(existing.author))
        .bind(book.isbn.clone().unwrap_or(existing.isbn))
        .bind(book.year.unwrap_or(existing.year))
        .bind(book.genre.clone().unwrap_or(existing.genre))
        .bind(book.summary.clone().unwrap_or(existing.summary))
        .bind(book.status.unwrap_or(existing.status))
        .bind(book.cost.or(existing.cost))
        .bind(borrower_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a book; transactions referencing it cascade
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }

    /// Count books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count books with the given status
    pub async fn count_by_status(&self, status: BookStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
