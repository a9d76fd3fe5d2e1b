//! Borrowing transaction service

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::transaction::{
        CreateTransaction, TransactionDetails, TransactionQuery, UpdateTransaction,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TransactionsService {
    repository: Repository,
}

impl TransactionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get transaction details by ID
    pub async fn get_details(&self, id: i64) -> AppResult<TransactionDetails> {
        self.repository.transactions.get_details(id).await
    }

    /// Search transactions
    pub async fn search(
        &self,
        query: &TransactionQuery,
    ) -> AppResult<(Vec<TransactionDetails>, i64)> {
        self.repository.transactions.search(query).await
    }

    /// Record a borrow (create a transaction)
    pub async fn borrow(&self, event: CreateTransaction) -> AppResult<TransactionDetails> {
        self.repository.transactions.create(&event, Utc::now()).await
    }

    /// Update the return state of a transaction
    pub async fn update(&self, id: i64, event: UpdateTransaction) -> AppResult<TransactionDetails> {
        self.repository.transactions.update(id, &event, Utc::now()).await
    }

    /// Return a borrowed book; defaults the return date to now
    pub async fn return_transaction(
        &self,
        id: i64,
        date_returned: Option<DateTime<Utc>>,
    ) -> AppResult<TransactionDetails> {
        let transaction = self.repository.transactions.get_by_id(id).await?;

        if transaction.returned {
            return Err(AppError::BusinessRule(
                "Transaction already returned".to_string(),
            ));
        }

        let now = Utc::now();
        let event = UpdateTransaction {
            date_returned: Some(date_returned.unwrap_or(now)),
            returned: Some(true),
        };

        self.repository.transactions.update(id, &event, now).await
    }

    /// Borrowing history for a member
    pub async fn find_by_member(&self, member_id: Uuid) -> AppResult<Vec<TransactionDetails>> {
        self.repository.transactions.find_by_member(member_id).await
    }

    /// Count open transactions
    pub async fn count_active(&self) -> AppResult<i64> {
        self.repository.transactions.count_active().await
    }

    /// Count returned transactions
    pub async fn count_returned(&self) -> AppResult<i64> {
        self.repository.transactions.count_returned().await
    }
}
