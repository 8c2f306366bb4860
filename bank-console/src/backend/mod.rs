//! # Backend Module
//!
//! Contains all non-UI logic for the Global Bank console.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (interactive console shell)
//!     ↓
//! Domain Layer (validation, account service)
//!     ↓
//! Storage Layer (SQLite via SQLx)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use log::info;

use crate::backend::domain::AccountService;
use crate::backend::storage::DbConnection;

/// Services the console needs, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
}

/// Open the database and build the services on top of it
pub async fn initialize_backend(database_url: &str) -> Result<AppState> {
    info!("Setting up database at {}", database_url);
    let db_conn = DbConnection::new(database_url).await?;

    info!("Setting up domain model");
    let account_service = AccountService::new(db_conn);

    Ok(AppState { account_service })
}
