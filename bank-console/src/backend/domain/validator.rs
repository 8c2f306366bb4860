//! Field checks applied before anything touches the database.
//!
//! The `is_valid_*` predicates are total and side-effect free. The
//! `validate_*` wrappers turn a failed predicate into a [`ValidationError`]
//! so services and the console can propagate it with `?`.

use std::fmt;

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_ADDRESS_LENGTH: usize = 5;
pub const CONTACT_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid name.")]
    InvalidName,
    #[error("Invalid contact.")]
    InvalidContact,
    #[error("Invalid address.")]
    InvalidAddress,
    #[error("{0} amount must be positive.")]
    AmountNotPositive(AmountOperation),
    #[error("Deposit would push the balance beyond the supported range.")]
    BalanceOverflow,
}

/// Operation an amount was entered for, used in the error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountOperation {
    Deposit,
    Withdrawal,
}

impl fmt::Display for AmountOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountOperation::Deposit => write!(f, "Deposit"),
            AmountOperation::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_LENGTH
}

/// Exactly ten ASCII digits, nothing else (no trimming)
pub fn is_valid_contact(contact: &str) -> bool {
    contact.len() == CONTACT_DIGITS && contact.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_valid_address(address: &str) -> bool {
    address.trim().chars().count() >= MIN_ADDRESS_LENGTH
}

/// Strictly positive. NaN fails the comparison and is rejected too.
pub fn is_valid_amount(amount: f64) -> bool {
    amount > 0.0
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName)
    }
}

pub fn validate_contact(contact: &str) -> Result<(), ValidationError> {
    if is_valid_contact(contact) {
        Ok(())
    } else {
        Err(ValidationError::InvalidContact)
    }
}

pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAddress)
    }
}

pub fn validate_amount(amount: f64, operation: AmountOperation) -> Result<(), ValidationError> {
    if is_valid_amount(amount) {
        Ok(())
    } else {
        Err(ValidationError::AmountNotPositive(operation))
    }
}

/// Checks name, contact and address in that order and reports the first failure
pub fn validate_registration(name: &str, contact: &str, address: &str) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_contact(contact)?;
    validate_address(address)
}
