use std::sync::Arc;

use anyhow::Context;
use common::storage::s3::S3ObjectStore;
use tracing::info;

use menu_server::config::AppConfig;
use menu_server::database::init_db;
use menu_server::repository::SeaOrmMenuRepository;
use menu_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected, schema synced");

    let store = S3ObjectStore::new(&config.storage).context("Failed to configure storage")?;
    info!(
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        "Object storage configured"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(
        config,
        Arc::new(SeaOrmMenuRepository::new(db)),
        Arc::new(store),
    );
    let app = menu_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
