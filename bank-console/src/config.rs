//! Startup settings, read once from the environment.

use crate::backend::storage::connection::DEFAULT_DATABASE_URL;

pub const DATABASE_URL_VAR: &str = "GLOBAL_BANK_DATABASE_URL";
pub const LOG_FILTER_VAR: &str = "GLOBAL_BANK_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLx connection URL of the bank database
    pub database_url: String,
    /// Default log directive; `RUST_LOG` takes precedence when set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            database_url: read(DATABASE_URL_VAR).unwrap_or(defaults.database_url),
            log_filter: read(LOG_FILTER_VAR).unwrap_or(defaults.log_filter),
        }
    }
}
