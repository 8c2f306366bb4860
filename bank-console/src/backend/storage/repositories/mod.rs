// Repository modules
pub mod account_repository;
pub mod transaction_repository;

// Re-export repository types
pub use account_repository::AccountRepository;
pub use transaction_repository::TransactionRepository;
