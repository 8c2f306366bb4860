//! # Storage Module
//!
//! Data persistence for the bank console, backed by SQLite through SQLx.
//!
//! - **connection.rs** - database handle, schema setup, scoped connection and
//!   transaction guards
//! - **repositories/** - plain parameterized queries against `accounts` and
//!   `transactions`
//!
//! Repositories never open connections themselves. The domain layer borrows a
//! connection (or a database transaction) per operation and passes it down,
//! so a read and the writes that depend on it share one scope.

pub mod connection;
pub mod repositories;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{AccountRepository, TransactionRepository};
