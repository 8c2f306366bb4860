use anyhow::{Context, Result};
use sqlx::pool::PoolConnection;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool, Transaction};
use std::sync::Arc;

// The database URL used when none is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite:global_bank.db";

/// DbConnection owns the handle to the bank database.
///
/// Callers never hold a connection across user interaction: each service
/// operation borrows one through [`DbConnection::acquire`] or
/// [`DbConnection::begin`] and gives it back when the guard is dropped.
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("failed to create database at {}", url))?;
        }

        let pool = SqlitePool::connect(url)
            .await
            .with_context(|| format!("failed to connect to {}", url))?;

        Self::setup_schema(&pool)
            .await
            .context("failed to set up database schema")?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Borrow a single connection for read-only work.
    /// Released back to the pool when dropped.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Open a database transaction. Rolls back on drop unless committed.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                account_number INTEGER PRIMARY KEY AUTOINCREMENT,
                holder_name TEXT NOT NULL,
                contact TEXT NOT NULL,
                address TEXT NOT NULL,
                balance REAL NOT NULL DEFAULT 0.0
            );
            "#,
        )
        .execute(pool)
        .await?;

        // created_at keeps milliseconds; id breaks ties between equal timestamps
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_number INTEGER NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('ACCOUNT_OPEN', 'DEPOSIT', 'WITHDRAW')),
                amount REAL NOT NULL,
                balance_after REAL NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
                FOREIGN KEY (account_number) REFERENCES accounts (account_number)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Mini statements read the newest rows of one account
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_account_created_at
            ON transactions(account_number, created_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
