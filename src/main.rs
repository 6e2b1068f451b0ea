use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    services::OmdbProvider,
    store::DatasetStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Missing or inconsistent artifacts are fatal: nothing can be served without them
    let datasets = DatasetStore::load(&config.data_dir).with_context(|| {
        format!("Failed to load datasets from {}", config.data_dir.display())
    })?;

    let provider = OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        config.http_timeout(),
    )
    .context("Failed to build OMDb client")?;

    let state = AppState::new(&config, datasets, Arc::new(provider));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server running");

    axum::serve(listener, app).await?;

    Ok(())
}
