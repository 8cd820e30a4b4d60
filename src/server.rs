use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    pricing::{ResourceLocation, RunnerTableService, TableUpdater},
    signals::setup_signal_handlers,
    static_files,
};

/// Start the runner prices server
///
/// This function:
/// 1. Spawns the background fetch of the runner prices
/// 2. Sets up signal handlers for graceful shutdown and reload
/// 3. Binds to the configured address
/// 4. Serves requests with graceful shutdown support
pub async fn start_server(config: Config) -> Result<()> {
    info!("Runner prices service starting...");

    let service = Arc::new(RunnerTableService::new());
    let updater = Arc::new(TableUpdater::new(
        service.clone(),
        ResourceLocation::parse(&config.source.location),
        config.source.timeout(),
        config.source.refresh_interval(),
    ));

    // The page is served right away; rows appear once the fetch completes
    tokio::spawn(updater.clone().start_background_task());

    let (_shutdown_tx, mut shutdown_rx, signal_handle) = setup_signal_handlers(updater);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let app = create_router(AppState::new(config.clone(), service));

    info!("Serving runner prices on http://{}", addr);
    info!(
        "Configuration: source {}, refresh {}",
        config.source.location,
        config
            .source
            .refresh_interval()
            .map(|d| format!("every {}s", d.as_secs()))
            .unwrap_or_else(|| "disabled".to_string())
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/runners", get(handlers::api::list_runners))
        .route("/api/calculate", post(handlers::api::calculate))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/assets/*path", get(static_files::serve_asset))
        .merge(api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
