mod analysis;
mod builder;
mod chat;
mod config;
mod errors;
mod jobs;
mod pages;
mod routes;
mod score;
mod services;
mod sessions;
mod state;
mod upload;
mod workflow;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerMatch API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Upload policy: {} up to {}MB",
        config.upload.accepted_extensions.join(","),
        config.upload.max_size_mb
    );

    let state = AppState::from_config(config.clone())?;
    state
        .sessions
        .spawn_sweeper(config.session_idle, config.session_sweep_interval);
    info!(
        "Idle sessions expire after {}s",
        config.session_idle.as_secs()
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::select! {
        r = axum::serve(listener, app) => r?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received ctrl+c, shutting down");
        }
    }

    Ok(())
}
