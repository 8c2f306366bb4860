//! Human-readable text for console results. Currency is always two decimals.

use shared::MiniStatementEntry;

use crate::backend::domain::{BankError, ErrorKind};

pub const ERROR_MARKER: &str = "[ERROR]";

pub fn registered(account_number: i64) -> String {
    format!(
        "Account created! Welcome to Global Bank. Your account number: {}",
        account_number
    )
}

pub fn deposited(account_number: i64, amount: f64, new_balance: f64) -> String {
    format!(
        "Deposited {:.2} into account {} at Global Bank. New balance: {:.2}",
        amount, account_number, new_balance
    )
}

pub fn withdrawn(new_balance: f64) -> String {
    format!("Withdrawal successful from Global Bank. New balance: {:.2}", new_balance)
}

pub fn balance(account_number: i64, balance: f64) -> String {
    format!(
        "Current balance for account {} at Global Bank: {:.2}",
        account_number, balance
    )
}

pub fn statement_line(entry: &MiniStatementEntry) -> String {
    format!(
        "{} | {:<10} | {:+8.2} | bal: {:8.2}",
        entry.created_at, entry.kind, entry.signed_amount, entry.balance_after
    )
}

/// Header plus one line per entry, or a single notice when there are none
pub fn mini_statement(entries: &[MiniStatementEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No transactions yet.".to_string()];
    }

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push("Global Bank - Mini Statement (most recent first):".to_string());
    lines.extend(entries.iter().map(statement_line));
    lines
}

pub fn error_message(message: &str) -> String {
    format!("{} {}", ERROR_MARKER, message)
}

/// Storage failures are reported as a failed operation, everything else
/// verbatim
pub fn bank_error(error: &BankError) -> String {
    match error.kind() {
        ErrorKind::Persistence => error_message(&format!("Operation failed: {}", error)),
        ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::InsufficientFunds => {
            error_message(&error.to_string())
        }
    }
}
