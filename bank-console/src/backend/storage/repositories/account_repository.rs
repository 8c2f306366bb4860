use shared::Account;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Row, SqliteConnection};

/// Repository for account rows.
///
/// Methods run on a borrowed connection so the caller decides whether they
/// share a database transaction.
#[derive(Clone, Default)]
pub struct AccountRepository;

impl AccountRepository {
    pub fn new() -> Self {
        Self
    }

    /// Insert a new account with a zero balance.
    /// The generated account number is `last_insert_rowid()` of the result.
    pub async fn insert_account(
        &self,
        conn: &mut SqliteConnection,
        holder_name: &str,
        contact: &str,
        address: &str,
    ) -> Result<SqliteQueryResult, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO accounts (holder_name, contact, address, balance)
            VALUES (?, ?, ?, 0.0)
            "#,
        )
        .bind(holder_name)
        .bind(contact)
        .bind(address)
        .execute(&mut *conn)
        .await
    }

    /// Full account row, `None` if it does not exist
    pub async fn find(
        &self,
        conn: &mut SqliteConnection,
        account_number: i64,
    ) -> Result<Option<Account>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT account_number, holder_name, contact, address, balance
            FROM accounts
            WHERE account_number = ?
            "#,
        )
        .bind(account_number)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(r) => Ok(Some(Account {
                account_number: r.get("account_number"),
                holder_name: r.get("holder_name"),
                contact: r.get("contact"),
                address: r.get("address"),
                balance: r.get("balance"),
            })),
            None => Ok(None),
        }
    }

    /// Current balance of an account, `None` if it does not exist
    pub async fn find_balance(
        &self,
        conn: &mut SqliteConnection,
        account_number: i64,
    ) -> Result<Option<f64>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT balance
            FROM accounts
            WHERE account_number = ?
            "#,
        )
        .bind(account_number)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(|r| r.get("balance")))
    }

    /// Overwrite the stored balance. Returns the number of rows changed.
    pub async fn update_balance(
        &self,
        conn: &mut SqliteConnection,
        account_number: i64,
        balance: f64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET balance = ?
            WHERE account_number = ?
            "#,
        )
        .bind(balance)
        .bind(account_number)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }
}
