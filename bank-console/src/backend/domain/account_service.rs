//! Account operations for the Global Bank console.
//!
//! Every mutation validates its input, then runs read, write and log insert
//! inside one database transaction. Nothing is committed unless all three
//! succeed, and the transaction guard rolls back on any early return.

use log::{debug, info, warn};
use shared::{MiniStatementEntry, TransactionKind, MINI_STATEMENT_LIMIT};

use super::errors::BankError;
use super::validator::{self, AmountOperation, ValidationError};
use crate::backend::storage::{AccountRepository, DbConnection, TransactionRepository};

/// Service responsible for registering accounts and moving money
#[derive(Clone)]
pub struct AccountService {
    db: DbConnection,
    account_repository: AccountRepository,
    transaction_repository: TransactionRepository,
}

impl AccountService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            db,
            account_repository: AccountRepository::new(),
            transaction_repository: TransactionRepository::new(),
        }
    }

    /// Open a new account with a zero balance and log an `ACCOUNT_OPEN` entry.
    /// Name and address are stored trimmed.
    pub async fn register(&self, name: &str, contact: &str, address: &str) -> Result<i64, BankError> {
        validator::validate_registration(name, contact, address)?;

        let mut tx = self.db.begin().await?;
        let result = self
            .account_repository
            .insert_account(&mut tx, name.trim(), contact, address.trim())
            .await?;

        if result.rows_affected() == 0 {
            return Err(BankError::Persistence("Account creation failed.".to_string()));
        }
        let account_number = result.last_insert_rowid();
        if account_number <= 0 {
            return Err(BankError::Persistence(
                "Account created but could not get account number.".to_string(),
            ));
        }

        self.transaction_repository
            .append(&mut tx, account_number, TransactionKind::AccountOpen, 0.0, 0.0)
            .await?;
        tx.commit().await?;

        info!("Registered account {}", account_number);
        Ok(account_number)
    }

    /// Add `amount` to the balance and return the new balance
    pub async fn deposit(&self, account_number: i64, amount: f64) -> Result<f64, BankError> {
        validator::validate_amount(amount, AmountOperation::Deposit)?;

        let mut tx = self.db.begin().await?;
        let balance = self
            .account_repository
            .find_balance(&mut tx, account_number)
            .await?
            .ok_or(BankError::NotFound(account_number))?;

        let new_balance = balance + amount;
        if !new_balance.is_finite() {
            warn!(
                "Refused deposit of {:.2} into account {}: balance would overflow",
                amount, account_number
            );
            return Err(ValidationError::BalanceOverflow.into());
        }
        self.write_balance(&mut tx, account_number, new_balance).await?;
        self.transaction_repository
            .append(&mut tx, account_number, TransactionKind::Deposit, amount, new_balance)
            .await?;
        tx.commit().await?;

        info!(
            "Deposited {:.2} into account {}: {:.2} -> {:.2}",
            amount, account_number, balance, new_balance
        );
        Ok(new_balance)
    }

    /// Take `amount` from the balance and return the new balance.
    /// Withdrawing the whole balance is allowed; anything more is refused.
    pub async fn withdraw(&self, account_number: i64, amount: f64) -> Result<f64, BankError> {
        validator::validate_amount(amount, AmountOperation::Withdrawal)?;

        let mut tx = self.db.begin().await?;
        let balance = self
            .account_repository
            .find_balance(&mut tx, account_number)
            .await?
            .ok_or(BankError::NotFound(account_number))?;

        if amount > balance {
            warn!(
                "Refused withdrawal of {:.2} from account {} with balance {:.2}",
                amount, account_number, balance
            );
            return Err(BankError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        let new_balance = balance - amount;
        self.write_balance(&mut tx, account_number, new_balance).await?;
        self.transaction_repository
            .append(&mut tx, account_number, TransactionKind::Withdraw, amount, new_balance)
            .await?;
        tx.commit().await?;

        info!(
            "Withdrew {:.2} from account {}: {:.2} -> {:.2}",
            amount, account_number, balance, new_balance
        );
        Ok(new_balance)
    }

    pub async fn get_balance(&self, account_number: i64) -> Result<f64, BankError> {
        let mut conn = self.db.acquire().await?;
        let balance = self
            .account_repository
            .find_balance(&mut conn, account_number)
            .await?
            .ok_or(BankError::NotFound(account_number))?;

        debug!("Balance lookup for account {}: {:.2}", account_number, balance);
        Ok(balance)
    }

    /// Up to [`MINI_STATEMENT_LIMIT`] most recent entries, newest first.
    /// An account without entries yields an empty list.
    pub async fn get_mini_statement(&self, account_number: i64) -> Result<Vec<MiniStatementEntry>, BankError> {
        let mut conn = self.db.acquire().await?;
        let account = self
            .account_repository
            .find(&mut conn, account_number)
            .await?
            .ok_or(BankError::NotFound(account_number))?;

        let records = self
            .transaction_repository
            .list_recent(&mut conn, account.account_number, MINI_STATEMENT_LIMIT)
            .await?;

        debug!(
            "Mini statement for account {} ({}): {} entries",
            account.account_number,
            account.holder_name,
            records.len()
        );
        Ok(records.into_iter().map(MiniStatementEntry::from).collect())
    }

    async fn write_balance(
        &self,
        conn: &mut sqlx::SqliteConnection,
        account_number: i64,
        balance: f64,
    ) -> Result<(), BankError> {
        let changed = self
            .account_repository
            .update_balance(conn, account_number, balance)
            .await?;
        if changed == 0 {
            return Err(BankError::Persistence(format!(
                "Balance update for account {} changed no rows.",
                account_number
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::errors::ErrorKind;

    async fn create_test_service() -> AccountService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AccountService::new(db)
    }

    async fn register_john(service: &AccountService) -> i64 {
        service
            .register("John Doe", "1234567890", "123 Main St")
            .await
            .expect("Failed to register account")
    }

    #[tokio::test]
    async fn test_register_starts_at_zero_with_open_entry() {
        let service = create_test_service().await;

        let account_number = register_john(&service).await;

        assert!(account_number > 0);
        assert_eq!(service.get_balance(account_number).await.unwrap(), 0.0);

        let statement = service.get_mini_statement(account_number).await.unwrap();
        assert_eq!(statement.len(), 1);
        assert_eq!(statement[0].kind, TransactionKind::AccountOpen);
        assert_eq!(statement[0].signed_amount, 0.0);
        assert_eq!(statement[0].balance_after, 0.0);
    }

    #[tokio::test]
    async fn test_register_generates_distinct_numbers() {
        let service = create_test_service().await;

        let first = register_john(&service).await;
        let second = service
            .register("Jane Roe", "0987654321", "42 Side Road")
            .await
            .unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_fields() {
        let service = create_test_service().await;

        let cases = [
            ("Jo", "1234567890", "123 Main St", ValidationError::InvalidName),
            ("John Doe", "12345", "123 Main St", ValidationError::InvalidContact),
            ("John Doe", "1234567890", "St", ValidationError::InvalidAddress),
        ];

        for (name, contact, address, expected) in cases {
            match service.register(name, contact, address).await {
                Err(BankError::Validation(err)) => assert_eq!(err, expected),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_deposit_adds_to_balance() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;

        let mut expected = 0.0;
        for amount in [0.5, 20.25, 100.0] {
            let new_balance = service.deposit(account_number, amount).await.unwrap();
            expected += amount;
            assert_eq!(new_balance, expected);
            assert_eq!(service.get_balance(account_number).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_withdraw_subtracts_and_allows_full_balance() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;
        service.deposit(account_number, 100.0).await.unwrap();

        assert_eq!(service.withdraw(account_number, 30.0).await.unwrap(), 70.0);
        assert_eq!(service.withdraw(account_number, 70.0).await.unwrap(), 0.0);
        assert_eq!(service.get_balance(account_number).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_withdraw_more_than_balance_is_refused() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;
        service.deposit(account_number, 50.0).await.unwrap();

        let err = service.withdraw(account_number, 50.01).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_eq!(service.get_balance(account_number).await.unwrap(), 50.0);

        // the refused attempt leaves no log entry
        let statement = service.get_mini_statement(account_number).await.unwrap();
        assert_eq!(statement.len(), 2);
    }

    #[tokio::test]
    async fn test_non_positive_amounts_are_rejected() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;
        service.deposit(account_number, 10.0).await.unwrap();

        for amount in [0.0, -1.0, -250.0, f64::NAN] {
            let err = service.deposit(account_number, amount).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            let err = service.withdraw(account_number, amount).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }

        assert_eq!(service.get_balance(account_number).await.unwrap(), 10.0);
    }

    #[tokio::test]
    async fn test_validation_happens_before_lookup() {
        let service = create_test_service().await;

        let err = service.deposit(424242, -5.0).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let service = create_test_service().await;
        let missing = 424242;

        assert!(matches!(service.get_balance(missing).await, Err(BankError::NotFound(n)) if n == missing));
        assert!(matches!(service.deposit(missing, 5.0).await, Err(BankError::NotFound(_))));
        assert!(matches!(service.withdraw(missing, 5.0).await, Err(BankError::NotFound(_))));
        assert!(matches!(service.get_mini_statement(missing).await, Err(BankError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mini_statement_keeps_ten_newest_with_signs() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;

        // 1 open entry + 12 mutations
        for i in 1..=6 {
            service.deposit(account_number, 10.0 * i as f64).await.unwrap();
            service.withdraw(account_number, 5.0).await.unwrap();
        }
        let final_balance = service.get_balance(account_number).await.unwrap();

        let statement = service.get_mini_statement(account_number).await.unwrap();
        assert_eq!(statement.len(), MINI_STATEMENT_LIMIT as usize);
        assert!(statement.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        // newest first: last withdrawal on top
        assert_eq!(statement[0].kind, TransactionKind::Withdraw);
        assert_eq!(statement[0].signed_amount, -5.0);
        assert_eq!(statement[0].balance_after, final_balance);
        assert_eq!(statement[1].kind, TransactionKind::Deposit);
        assert_eq!(statement[1].signed_amount, 60.0);

        for entry in &statement {
            match entry.kind {
                TransactionKind::Withdraw => assert!(entry.signed_amount < 0.0),
                _ => assert!(entry.signed_amount >= 0.0),
            }
        }
        assert!(statement.iter().all(|e| e.kind != TransactionKind::AccountOpen));
    }

    #[tokio::test]
    async fn test_log_balance_matches_account_after_each_mutation() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;

        service.deposit(account_number, 80.0).await.unwrap();
        let after_withdraw = service.withdraw(account_number, 12.5).await.unwrap();

        let statement = service.get_mini_statement(account_number).await.unwrap();
        assert_eq!(statement[0].balance_after, after_withdraw);
        assert_eq!(statement[1].balance_after, 80.0);
        assert_eq!(service.get_balance(account_number).await.unwrap(), after_withdraw);
    }

    #[tokio::test]
    async fn test_reads_are_repeatable() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;
        service.deposit(account_number, 42.0).await.unwrap();

        let first_balance = service.get_balance(account_number).await.unwrap();
        let first_statement = service.get_mini_statement(account_number).await.unwrap();

        for _ in 0..3 {
            assert_eq!(service.get_balance(account_number).await.unwrap(), first_balance);
            assert_eq!(service.get_mini_statement(account_number).await.unwrap(), first_statement);
        }
    }

    #[tokio::test]
    async fn test_register_stores_trimmed_fields() {
        let service = create_test_service().await;

        let account_number = service
            .register("  John Doe ", "1234567890", "  123 Main St  ")
            .await
            .unwrap();

        let mut conn = service.db.acquire().await.unwrap();
        let account = service
            .account_repository
            .find(&mut conn, account_number)
            .await
            .unwrap()
            .expect("Account should exist");

        assert_eq!(account.holder_name, "John Doe");
        assert_eq!(account.contact, "1234567890");
        assert_eq!(account.address, "123 Main St");
        assert_eq!(account.balance, 0.0);
    }

    #[tokio::test]
    async fn test_deposit_that_would_overflow_is_refused() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;

        service.deposit(account_number, 1e308).await.unwrap();
        match service.deposit(account_number, 1e308).await {
            Err(BankError::Validation(err)) => assert_eq!(err, ValidationError::BalanceOverflow),
            other => panic!("expected validation error, got {:?}", other),
        }

        assert_eq!(service.get_balance(account_number).await.unwrap(), 1e308);
        assert_eq!(service.get_mini_statement(account_number).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_balance_write_rolls_back_the_scope() {
        let service = create_test_service().await;
        let account_number = register_john(&service).await;

        {
            let mut tx = service.db.begin().await.unwrap();
            service
                .transaction_repository
                .append(&mut tx, account_number, TransactionKind::Deposit, 10.0, 10.0)
                .await
                .unwrap();

            let err = service.write_balance(&mut tx, 424242, 10.0).await.unwrap_err();
            assert!(matches!(err, BankError::Persistence(_)));
            assert_eq!(err.kind(), ErrorKind::Persistence);
            assert_eq!(
                err.to_string(),
                "Balance update for account 424242 changed no rows."
            );
            // dropped without commit
        }

        let statement = service.get_mini_statement(account_number).await.unwrap();
        assert_eq!(statement.len(), 1);
        assert_eq!(statement[0].kind, TransactionKind::AccountOpen);
        assert_eq!(service.get_balance(account_number).await.unwrap(), 0.0);
    }
}
