//! API handlers for Soma REST endpoints

pub mod books;
pub mod health;
pub mod members;
pub mod openapi;
pub mod stats;
pub mod transactions;
