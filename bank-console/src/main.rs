use anyhow::{Context, Result};
use global_bank::backend::io::ShellContext;
use global_bank::{initialize_backend, logging, AppConfig};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init(&config.log_filter)?;

    info!("Starting Global Bank console");
    let app_state = initialize_backend(&config.database_url)
        .await
        .with_context(|| format!("could not open bank database {}", config.database_url))?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = ShellContext::new(app_state.account_service, stdin.lock(), stdout.lock());
    shell.run().await.context("console I/O failed")?;

    info!("Console closed");
    Ok(())
}
