use shared::{TransactionKind, TransactionRecord};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

/// Repository for the append-only transaction log
#[derive(Clone, Default)]
pub struct TransactionRepository;

impl TransactionRepository {
    pub fn new() -> Self {
        Self
    }

    /// Append one log entry; `created_at` is assigned by the database.
    /// Returns the row id of the new entry.
    pub async fn append(
        &self,
        conn: &mut SqliteConnection,
        account_number: i64,
        kind: TransactionKind,
        amount: f64,
        balance_after: f64,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (account_number, type, amount, balance_after)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(account_number)
        .bind(kind.as_str())
        .bind(amount)
        .bind(balance_after)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Most recent entries for an account, newest first
    pub async fn list_recent(
        &self,
        conn: &mut SqliteConnection,
        account_number: i64,
        limit: u32,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_number, type, amount, balance_after, created_at
            FROM transactions
            WHERE account_number = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(account_number)
        .bind(limit as i64)
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(Self::record_from_row).collect()
    }

    fn record_from_row(row: &SqliteRow) -> Result<TransactionRecord, sqlx::Error> {
        let kind = row
            .try_get::<String, _>("type")?
            .parse::<TransactionKind>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(TransactionRecord {
            id: row.try_get("id")?,
            account_number: row.try_get("account_number")?,
            kind,
            amount: row.try_get("amount")?,
            balance_after: row.try_get("balance_after")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
