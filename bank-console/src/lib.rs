pub mod backend;
pub mod config;
pub mod logging;

pub use backend::{initialize_backend, AppState};
pub use config::AppConfig;
