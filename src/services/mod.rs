//! Business logic services

pub mod books;
pub mod members;
pub mod stats;
pub mod transactions;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub members: members::MembersService,
    pub books: books::BooksService,
    pub transactions: transactions::TransactionsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            members: members::MembersService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            transactions: transactions::TransactionsService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
