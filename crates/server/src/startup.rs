use axum::Router;
use configs::{AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{runtime, EmployeeDirectory};

// the directory UI is served from another origin
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the directory and assemble the router. Any failure here means the process must not serve.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    runtime::ensure_env(&cfg.server.frontend_dir, &cfg.directory.data_file)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let store = EmployeeDirectory::load(&cfg.directory.data_file, cfg.directory.persist_writes).await?;
    let state = AppState::new(store);

    Ok(routes::build_router(
        state,
        &cfg.server.api_prefix,
        &cfg.server.frontend_dir,
        build_cors(),
    ))
}

async fn bind(server: &ServerConfig) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind((server.host.as_str(), server.port)).await?;
    Ok(listener)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app from an already loaded config and serve until Ctrl+C.
/// Environment, logging and config loading belong to the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = bind(&cfg.server).await?;
    let addr = listener.local_addr()?;
    info!(%addr, api_prefix = %cfg.server.api_prefix, data_file = %cfg.directory.data_file, "starting employee directory server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
