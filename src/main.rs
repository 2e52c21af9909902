use std::sync::Arc;

use authnav::config::{AppConfig, ConfigError};
use authnav::services::memory_store::MemorySessionStore;
use authnav::services::pg_store::PgSessionStore;
use authnav::services::session::SessionStore;
use authnav::state::AppState;
use authnav::routes;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "authnav failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;

    let sessions: Arc<dyn SessionStore> = match config.database_url.as_deref() {
        Some(url) => Arc::new(PgSessionStore::connect(url, config.db_max_connections, config.session_ttl).await?),
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory session store");
            Arc::new(MemorySessionStore::new(config.session_ttl))
        }
    };

    if config.dev_auth_bypass {
        tracing::warn!("DEV_AUTH_BYPASS enabled; /api/dev/session issues sessions without login");
    }

    let port = config.port;
    let app = routes::app(AppState::new(config, sessions));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    tracing::info!(%port, "authnav listening");
    axum::serve(listener, app).await?;
    Ok(())
}
