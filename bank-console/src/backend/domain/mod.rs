//! # Domain Module
//!
//! Business rules of the Global Bank console.
//!
//! - **validator**: pure field checks (name, contact, address, amount)
//! - **errors**: the error kinds every operation can fail with
//! - **account_service**: register, deposit, withdraw, balance and mini
//!   statement on top of the storage repositories
//!
//! The domain knows nothing about the console. It returns typed results and
//! leaves presentation to the io layer.

pub mod account_service;
pub mod errors;
pub mod validator;

pub use account_service::*;
pub use errors::*;
pub use validator::{AmountOperation, ValidationError};
