//! Transactions repository for database operations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::transaction::{
        accrue, BookTransaction, CreateTransaction, TransactionDetails, TransactionQuery,
        UpdateTransaction,
    },
};

#[derive(Clone)]
pub struct TransactionsRepository {
    pool: Pool<Postgres>,
}

impl TransactionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get transaction by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<BookTransaction> {
        sqlx::query_as::<_, BookTransaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))
    }

    /// Get transaction with member and book names
    pub async fn get_details(&self, id: i64) -> AppResult<TransactionDetails> {
        let row = sqlx::query(
            r#"
            SELECT t.id, t.member_id, t.book_id, t.date_borrowed, t.date_returned,
                   t.returned, t.borrowed_days, t.total_cost,
                   m.name AS member_name, b.title AS book_title
            FROM transactions t
            JOIN members m ON m.id = t.member_id
            JOIN books b ON b.id = t.book_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))?;

        Ok(Self::details_from_row(&row))
    }

    /// Record a borrow: compute the derived fields and mirror the cost onto
    /// the member, all inside one database transaction
    pub async fn create(
        &self,
        event: &CreateTransaction,
        now: DateTime<Utc>,
    ) -> AppResult<TransactionDetails> {
        let mut tx = self.pool.begin().await?;

        let book_row = sqlx::query("SELECT title, cost FROM books WHERE id = $1")
            .bind(event.book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Book with id {} not found", event.book_id))
            })?;
        let book_title: String = book_row.get("title");
        let cost: Option<Decimal> = book_row.get("cost");

        let member_name: String = sqlx::query_scalar("SELECT name FROM members WHERE id = $1")
            .bind(event.member_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Member with id {} not found", event.member_id))
            })?;

        let (borrowed_days, total_cost) = accrue(now, None, now, cost)?;

        // Member update goes first so no reader sees the transaction without it
        sqlx::query("UPDATE members SET cost_incurred = $1 WHERE id = $2")
            .bind(total_cost)
            .bind(event.member_id)
            .execute(&mut *tx)
            .await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO transactions (member_id, book_id, date_borrowed, returned,
                                      borrowed_days, total_cost)
            VALUES ($1, $2, $3, FALSE, $4, $5)
            RETURNING id
            "#,
        )
        .bind(event.member_id)
        .bind(event.book_id)
        .bind(now)
        .bind(borrowed_days)
        .bind(total_cost)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TransactionDetails {
            id,
            member_id: event.member_id,
            member_name,
            book_id: event.book_id,
            book_title,
            date_borrowed: now,
            date_returned: None,
            returned: false,
            borrowed_days,
            total_cost,
        })
    }

    /// Apply a return-state change, recompute the derived fields and mirror
    /// the cost onto the member, all inside one database transaction.
    /// date_borrowed is never touched.
    pub async fn update(
        &self,
        id: i64,
        event: &UpdateTransaction,
        now: DateTime<Utc>,
    ) -> AppResult<TransactionDetails> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT t.member_id, t.book_id, t.date_borrowed, t.date_returned, t.returned,
                   m.name AS member_name, b.title AS book_title, b.cost
            FROM transactions t
            JOIN members m ON m.id = t.member_id
            JOIN books b ON b.id = t.book_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))?;

        let member_id: Uuid = row.get("member_id");
        let date_borrowed: DateTime<Utc> = row.get("date_borrowed");
        let date_returned = event.date_returned.or(row.get("date_returned"));
        let returned = event.returned.unwrap_or_else(|| row.get("returned"));
        let cost: Option<Decimal> = row.get("cost");

        let (borrowed_days, total_cost) = accrue(date_borrowed, date_returned, now, cost)?;

        sqlx::query("UPDATE members SET cost_incurred = $1 WHERE id = $2")
            .bind(total_cost)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE transactions
            SET date_returned = $2, returned = $3, borrowed_days = $4, total_cost = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(date_returned)
        .bind(returned)
        .bind(borrowed_days)
        .bind(total_cost)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TransactionDetails {
            id,
            member_id,
            member_name: row.get("member_name"),
            book_id: row.get("book_id"),
            book_title: row.get("book_title"),
            date_borrowed,
            date_returned,
            returned,
            borrowed_days,
            total_cost,
        })
    }

    /// Search transactions with pagination
    pub async fn search(
        &self,
        query: &TransactionQuery,
    ) -> AppResult<(Vec<TransactionDetails>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(20);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM transactions t
            WHERE ($1::uuid IS NULL OR t.member_id = $1)
              AND ($2::uuid IS NULL OR t.book_id = $2)
              AND ($3::boolean IS NULL OR t.returned = $3)
            "#,
        )
        .bind(query.member_id)
        .bind(query.book_id)
        .bind(query.returned)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT t.id, t.member_id, t.book_id, t.date_borrowed, t.date_returned,
                   t.returned, t.borrowed_days, t.total_cost,
                   m.name AS member_name, b.title AS book_title
            FROM transactions t
            JOIN members m ON m.id = t.member_id
            JOIN books b ON b.id = t.book_id
            WHERE ($1::uuid IS NULL OR t.member_id = $1)
              AND ($2::uuid IS NULL OR t.book_id = $2)
              AND ($3::boolean IS NULL OR t.returned = $3)
            ORDER BY t.date_borrowed
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(query.member_id)
        .bind(query.book_id)
        .bind(query.returned)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let transactions = rows.iter().map(Self::details_from_row).collect();

        Ok((transactions, total))
    }

    /// Borrowing history for a member, oldest first
    pub async fn find_by_member(&self, member_id: Uuid) -> AppResult<Vec<TransactionDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.member_id, t.book_id, t.date_borrowed, t.date_returned,
                   t.returned, t.borrowed_days, t.total_cost,
                   m.name AS member_name, b.title AS book_title
            FROM transactions t
            JOIN members m ON m.id = t.member_id
            JOIN books b ON b.id = t.book_id
            WHERE t.member_id = $1
            ORDER BY t.date_borrowed
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::details_from_row).collect())
    }

    /// Count open (unreturned) transactions
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE NOT returned")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count returned transactions
    pub async fn count_returned(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE returned")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    fn details_from_row(row: &sqlx::postgres::PgRow) -> TransactionDetails {
        TransactionDetails {
            id: row.get("id"),
            member_id: row.get("member_id"),
            member_name: row.get("member_name"),
            book_id: row.get("book_id"),
            book_title: row.get("book_title"),
            date_borrowed: row.get("date_borrowed"),
            date_returned: row.get("date_returned"),
            returned: row.get("returned"),
            borrowed_days: row.get("borrowed_days"),
            total_cost: row.get("total_cost"),
        }
    }
}
