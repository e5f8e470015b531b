//! Top-up Gateway - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the provider client
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

use std::sync::Arc;

use topup_gateway::{AppState, build_router, config, services::ding_connect::DingConnectClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let key_hashes = config.normalized_key_hashes();

    let client = DingConnectClient::new(
        &config.ding_api_base_url,
        config.ding_api_key.clone(),
        config.upstream_timeout(),
    )?;
    tracing::info!(base_url = %client.base_url(), "Provider client created");

    let state = AppState::new(Arc::new(client), key_hashes);
    let app = build_router(state, config.cors_allow_any_origin);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
