mod config;
mod errors;
mod nav;
mod portfolio;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    let links = nav::load_links(config.nav_manifest.as_deref())
        .context("failed to load navigation links")?;
    info!(
        "Navigation: {} links, probe {}px, clearance {}px",
        links.len(),
        config.nav.probe_offset,
        config.nav.header_clearance
    );

    if !config.site_dir.is_dir() {
        tracing::warn!(
            "Site directory {} does not exist; static routes will 404",
            config.site_dir.display()
        );
    }
    info!("Serving site from {}", config.site_dir.display());

    let state = AppState::new(config.clone(), links);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
