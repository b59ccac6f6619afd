//! Bishops API server
//!
//! Listens on `BISHOPS_API_ADDR` (default `0.0.0.0:8000`). Log filter from
//! `RUST_LOG`, default `info`.

use anyhow::{Context, Result};
use bishops_core::{GameSettings, SolverSettings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = std::env::var("BISHOPS_API_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let state = bishops_api::app_state(GameSettings::default(), SolverSettings::default())?;
    let app = bishops_api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Bishops API running on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
