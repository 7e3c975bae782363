use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use service::{resource::Resources, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open every resource store under `data_dir` and build the router on top.
pub async fn build_app(data_dir: &str) -> anyhow::Result<Router> {
    runtime::ensure_env(data_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    let resources = Resources::open(data_dir).await?;
    Ok(routes::build_router(resources, build_cors()))
}

/// Bind the configured `host:port`; hostnames such as `localhost` are resolved.
pub async fn bind(cfg: &AppConfig) -> Result<TcpListener, StartupError> {
    let addr = cfg.bind_addr();
    let bound = TcpListener::bind(addr.as_str()).await;
    bound.map_err(|source| StartupError::Bind { addr, source })
}

/// Serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg.storage.data_dir).await?;

    let listener = bind(&cfg).await?;
    let addr = listener.local_addr()?;
    info!(%addr, data_dir = %cfg.storage.data_dir, "central de compras listening");
    info!("API docs at http://{addr}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}
