//! Point d'entrée de BoomServer
//!
//! Charge la configuration, ouvre les deux magasins (bibliothèque et
//! planning BomCast), monte l'API REST et sert jusqu'à Ctrl+C.

mod api;
mod state;

use boomcast::CastStore;
use boomconfig::get_config;
use boomstore::LibraryStore;
use boomtube::TubeClient;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_min_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();

    let library = Arc::new(LibraryStore::new(&config.get_library_db_path()?)?);
    let cast = Arc::new(CastStore::new(&config.get_bomcast_db_path()?)?);
    let tube = Arc::new(TubeClient::new(
        &config.get_youtube_api_key().unwrap_or_default(),
    ));

    let bomcast_dir = config.get_bomcast_dir()?;
    std::fs::create_dir_all(&bomcast_dir)?;

    let app = api::router(AppState {
        config: config.clone(),
        library,
        cast,
        tube,
        bomcast_dir,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.get_http_port()));
    info!("🌐 BoomServer running at http://{}", addr);
    info!("Press Ctrl+C to stop...");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("✅ BoomServer stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl_c");
    info!("Ctrl+C reçu, arrêt gracieux");
}
