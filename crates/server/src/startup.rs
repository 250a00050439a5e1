use std::{env, io, net::SocketAddr, sync::Arc};

use axum::Router;
use common::PaginationConfig;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|io| io.kind() == io::ErrorKind::NotFound)
}

/// Defaults overridden by `SERVER_HOST`, `SERVER_PORT` and `TOKIO_WORKER_THREADS`.
fn config_from_env() -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    if let Some(w) = env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
        cfg.server.worker_threads = Some(w);
    }
    cfg
}

/// Load the config file at `path`. A missing file falls back to defaults and
/// env vars; an unreadable, malformed or invalid one is rejected.
pub fn load_config_from(path: &str) -> Result<AppConfig, StartupError> {
    let mut cfg = match configs::load_from_file(path) {
        Ok(cfg) => cfg,
        Err(e) if is_missing_file(&e) => {
            warn!(%path, "config file not found; using defaults and env vars");
            config_from_env()
        }
        Err(e) => return Err(StartupError::InvalidConfig(format!("{path}: {e}"))),
    };
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

/// Load the config file named by `CONFIG_PATH` (default `config.toml`).
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_config_from(&path)
}

pub fn pagination_config(cfg: &AppConfig) -> Result<PaginationConfig, StartupError> {
    cfg.pagination
        .to_config()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Public entry: build the app from a loaded config and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let pagination = pagination_config(&cfg)?;
    let state = ServerState { pagination: Arc::new(pagination) };
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(anyhow::Error::from)?;
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}
