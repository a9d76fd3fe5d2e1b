//! Statistics service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::book::BookStatus, repository::Repository};

/// Statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Member statistics
    pub members: MemberStats,
    /// Book statistics
    pub books: BookStats,
    /// Transaction statistics
    pub transactions: TransactionStats,
}

#[derive(Serialize, ToSchema)]
pub struct MemberStats {
    /// Total number of members
    pub total: i64,
}

#[derive(Serialize, ToSchema)]
pub struct BookStats {
    /// Total number of books
    pub total: i64,
    /// Books marked available
    pub available: i64,
    /// Books marked unavailable
    pub unavailable: i64,
}

#[derive(Serialize, ToSchema)]
pub struct TransactionStats {
    /// Open (unreturned) transactions
    pub active: i64,
    /// Returned transactions
    pub returned: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Gather entity counts
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let members = self.repository.members.count().await?;
        let books = self.repository.books.count().await?;
        let available = self
            .repository
            .books
            .count_by_status(BookStatus::Available)
            .await?;
        let unavailable = self
            .repository
            .books
            .count_by_status(BookStatus::Unavailable)
            .await?;
        let active = self.repository.transactions.count_active().await?;
        let returned = self.repository.transactions.count_returned().await?;

        Ok(StatsResponse {
            members: MemberStats { total: members },
            books: BookStats {
                total: books,
                available,
                unavailable,
            },
            transactions: TransactionStats { active, returned },
        })
    }
}
