use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of records shown on a mini statement
pub const MINI_STATEMENT_LIMIT: u32 = 10;

/// A holder's balance record, identified by a store-generated number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: i64,
    pub holder_name: String,
    /// Exactly 10 decimal digits
    pub contact: String,
    pub address: String,
    /// Only ever changed through deposits and withdrawals
    pub balance: f64,
}

/// Kind of balance-affecting event stored in the transaction log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Written once when the account is registered, amount 0.0
    AccountOpen,
    Deposit,
    Withdraw,
}

impl TransactionKind {
    /// Column value used in the `transactions.type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::AccountOpen => "ACCOUNT_OPEN",
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
        }
    }

    /// Signed view of a stored magnitude: withdrawals are negative,
    /// everything else is non-negative.
    pub fn signed_amount(&self, magnitude: f64) -> f64 {
        match self {
            TransactionKind::Withdraw => -magnitude.abs(),
            TransactionKind::AccountOpen | TransactionKind::Deposit => magnitude.abs(),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width/alignment flags working for statement columns
        f.pad(self.as_str())
    }
}

/// Returned when a stored `type` value is not one of the known kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransactionKind(pub String);

impl fmt::Display for UnknownTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction type '{}'", self.0)
    }
}

impl std::error::Error for UnknownTransactionKind {}

impl FromStr for TransactionKind {
    type Err = UnknownTransactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCOUNT_OPEN" => Ok(TransactionKind::AccountOpen),
            "DEPOSIT" => Ok(TransactionKind::Deposit),
            "WITHDRAW" => Ok(TransactionKind::Withdraw),
            other => Err(UnknownTransactionKind(other.to_string())),
        }
    }
}

/// Append-only log entry, one per successful account mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Insertion sequence, used to keep equal timestamps in a stable order
    pub id: i64,
    pub account_number: i64,
    pub kind: TransactionKind,
    /// Magnitude of the operation (0.0 for account open)
    pub amount: f64,
    /// Account balance immediately after this operation
    pub balance_after: f64,
    /// Store-assigned timestamp, `YYYY-MM-DD HH:MM:SS.SSS` (UTC)
    pub created_at: String,
}

/// One line of a mini statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniStatementEntry {
    pub created_at: String,
    pub kind: TransactionKind,
    pub signed_amount: f64,
    pub balance_after: f64,
}

impl From<TransactionRecord> for MiniStatementEntry {
    fn from(record: TransactionRecord) -> Self {
        Self {
            signed_amount: record.kind.signed_amount(record.amount),
            created_at: record.created_at,
            kind: record.kind,
            balance_after: record.balance_after,
        }
    }
}
