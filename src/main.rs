//! Bestiary server: load config, connect to PostgreSQL, ensure the table, serve.

use bestiary::{config, serve, AppState, PgStore, RetryPolicy, StartupError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bestiary=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "bestiary stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let path = config::config_path();
    let config = config::load(&path)?;
    tracing::info!(path = %path.display(), port = config.port, "configuration loaded");

    let store = PgStore::connect(&config.database_url, config.max_connections, RetryPolicy::default()).await?;
    store.ensure_schema().await?;

    serve(AppState::new(store), config.port).await
}
