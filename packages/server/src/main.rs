use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use contentcraft_server::config::AppConfig;
use contentcraft_server::database::init_db;
use contentcraft_server::media::CloudinaryClient;
use contentcraft_server::state::AppState;
use contentcraft_server::store::SqlStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected and schema synced");

    let images = CloudinaryClient::new(&config.media);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        store: Arc::new(SqlStore::new(db)),
        images: Arc::new(images),
        config: Arc::new(config),
    };

    let app = contentcraft_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
