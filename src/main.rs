//! Mergington High School activities API

use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mergington::{
    api::{self, AppState},
    config::Config,
    services::{ActivityCatalog, CredentialStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mergington=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mergington activities API...");

    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    let credentials = CredentialStore::load(&config.auth.teachers_file)
        .context("Failed to load teacher credentials")?;
    if credentials.is_empty() {
        tracing::warn!("No teacher credentials configured; every login will be rejected");
    }

    let catalog = ActivityCatalog::seeded();
    tracing::info!("Activity catalog seeded");

    let state = AppState::new(credentials, catalog);
    let app = api::build_router(state, &config.server.cors_origin, &config.assets.static_dir)
        .context("Failed to build router")?;

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
