use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::config::Config;
use crate::data::data_registry::GameData;
use crate::data::loader::GameDataLoader;

pub mod api;
pub mod routes;

/// The explorer API over an already loaded snapshot.
pub fn router(data: Arc<GameData>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/factions", get(routes::factions))
        .route("/api/factions/:faction/squads", get(routes::faction_squads))
        .route("/api/factions/:faction/buildings", get(routes::faction_buildings))
        .route("/api/squads/:id", get(routes::squad))
        .route("/api/weapons", get(routes::weapons))
        .route("/api/upgrades", get(routes::upgrades))
        .route("/api/diagnostics", get(routes::diagnostics))
        .fallback(routes::not_found)
        .with_state(data)
}

/// Load every table, then serve until the process is stopped.
pub async fn run_server(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = config.socket_addr()?;
    let loader = GameDataLoader::new(config.snapshot_source());
    let data = loader.initialize().await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "coh3-explorer listening");
    axum::serve(listener, router(data)).await?;
    Ok(())
}
