// Main entry point - Dependency injection and plugin server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use crate::application::dashboard_resource::DashboardResource;
use crate::infrastructure::config::load_provider_config;
use crate::infrastructure::newrelic_repository::NewRelicRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_provider_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(NewRelicRepository::new(
        config.api_url.clone(),
        config.api_key.clone(),
        Duration::from_secs(config.timeout_seconds),
    )?);

    // Create resource handlers (application layer)
    let dashboard_resource = DashboardResource::new(repository);

    // Create application state
    let state = Arc::new(AppState { dashboard_resource });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.listen_addr.parse()?;
    tracing::info!(%addr, api_url = %config.api_url, "starting newrelic dashboard provider");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
