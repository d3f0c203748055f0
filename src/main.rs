//! Analytics Router
//!
//! Receives analytics and consent commands as a verb plus path segments,
//! resolves each to a handler through a fixed routing table, and returns
//! the handler's output as JSON.

use std::sync::Arc;

use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;
mod logging;
mod routing;
mod storage;

use crate::api::build_router;
use crate::auth::ApiKeyValidator;
use crate::config::{AnalyticsConfig, Config};
use crate::handlers::HandlerRegistry;
use crate::routing::{Dispatcher, RouteTable};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Routing table bound to the handler registry.
    pub dispatcher: Arc<Dispatcher>,
    /// External analytics tooling settings.
    pub analytics: AnalyticsConfig,
    /// Client API keys, revocable at runtime.
    pub api_keys: ApiKeyValidator,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    logging::init();

    tracing::info!("Starting Analytics Router v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.url,
        auth_enabled = %config.auth.enabled,
        handlers = config.handlers.len(),
        "Configuration loaded"
    );

    let pool = storage::connect(&config.database).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to connect to database");
        anyhow::anyhow!("Database connection error: {}", e)
    })?;

    tracing::info!("Database connected");

    // Compile the routing table once and bind it to the configured handlers
    let table = RouteTable::standard()?;
    let registry = HandlerRegistry::from_config(&config.handlers, &pool)?;

    let unregistered: Vec<String> = table
        .entries()
        .iter()
        .filter(|entry| !registry.contains(entry.handler))
        .map(|entry| format!("{} {}", entry.scope, entry.path.join("/")))
        .collect();
    if !unregistered.is_empty() {
        tracing::warn!(
            count = unregistered.len(),
            routes = ?unregistered,
            "Routes without a registered handler will answer 501"
        );
    }

    if config.analytics.cli_exists() {
        tracing::info!(cli_path = ?config.analytics.cli_path, "Analytics CLI found");
    } else {
        tracing::info!(cli_path = ?config.analytics.cli_path, "Analytics CLI not available");
    }

    let state = AppState {
        dispatcher: Arc::new(Dispatcher::new(table, registry)),
        analytics: config.analytics.clone(),
        api_keys: ApiKeyValidator::new(config.auth.api_keys.clone()),
    };

    if config.auth.enabled {
        tracing::info!(api_keys = config.auth.api_keys.len(), "Authentication enabled");
    } else {
        tracing::warn!("Authentication is DISABLED - enable for production");
    }

    let app = build_router(state, config.auth.enabled);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
