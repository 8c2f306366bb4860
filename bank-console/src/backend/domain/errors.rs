use super::validator::ValidationError;

/// Coarse category of a [`BankError`], used by callers that only need to
/// know how to present a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InsufficientFunds,
    Persistence,
}

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Account {0} not found.")]
    NotFound(i64),
    #[error("Insufficient funds. Available balance: {balance:.2}, requested: {requested:.2}")]
    InsufficientFunds { balance: f64, requested: f64 },
    /// The store answered, but not with what the operation needed
    #[error("{0}")]
    Persistence(String),
    #[error("DB error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BankError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BankError::Validation(_) => ErrorKind::Validation,
            BankError::NotFound(_) => ErrorKind::NotFound,
            BankError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            BankError::Persistence(_) | BankError::Database(_) => ErrorKind::Persistence,
        }
    }
}
