use anyhow::Context;
use gateway::catalog_loader::load_catalog;
use gateway::config::GatewayConfig;
use gateway::router::create_router;
use gateway::state::AppState;
use league_engine::{Catalog, LeagueStore, StoreConfig};
use persistence::journal::JournalConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("Starting league gateway");

    let config = GatewayConfig::from_env().context("reading configuration")?;

    let client = reqwest::Client::new();
    let snapshot = load_catalog(&client, &config.catalog_source)
        .await
        .with_context(|| format!("loading catalog from {}", config.catalog_source.describe()))?;
    let catalog = Catalog::from_snapshot(snapshot);
    tracing::info!(
        participants = catalog.participant_count(),
        actions = catalog.action_count(),
        source = %config.catalog_source.describe(),
        "catalog loaded"
    );

    let store = LeagueStore::open(
        catalog,
        StoreConfig {
            budget_total: config.budget_total,
            journal: config.journal_dir.clone().map(|dir| JournalConfig {
                dir,
                fsync_every_write: config.journal_fsync,
            }),
        },
    )
    .context("opening league store")?;

    let state = AppState::new(Arc::new(store), config.catalog_source.clone());
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
