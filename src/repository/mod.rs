//! Repository layer for database operations

pub mod books;
pub mod members;
pub mod transactions;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub members: members::MembersRepository,
    pub books: books::BooksRepository,
    pub transactions: transactions::TransactionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            members: members::MembersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            transactions: transactions::TransactionsRepository::new(pool.clone()),
            pool,
        }
    }
}
