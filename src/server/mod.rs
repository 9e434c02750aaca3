//! HTTP server for the debate handler.
//!
//! This module provides:
//! - The request gate and failure translation for the debate route
//! - Permissive cross-origin headers on every response
//! - Shared, immutable application state

mod handlers;

pub use handlers::*;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{any, get};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::{Config, HEALTH_PATH};
use crate::debate::DebateOrchestrator;
use crate::error::AppResult;
use crate::openai::{CompletionService, OpenAiClient};

/// Application state shared across handlers.
///
/// Nothing in here is mutated after startup, so concurrent requests share it
/// freely.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Fans debates out to the agents.
    pub orchestrator: DebateOrchestrator,
}

/// Shared application state handle.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create new application state over any completion service
    pub fn new(config: Config, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            config,
            orchestrator: DebateOrchestrator::new(completion),
        }
    }

    /// Create application state backed by the configured OpenAI endpoint
    pub fn from_config(config: Config) -> AppResult<Self> {
        let client = OpenAiClient::new(&config.openai, config.request.clone())?;
        info!(
            base_url = %client.base_url(),
            model = %client.model(),
            "Chat completion client initialized"
        );
        Ok(Self::new(config, Arc::new(client)))
    }
}

/// Build the router: the debate route, a health probe, and the
/// cross-origin headers applied to everything.
pub fn router(state: SharedState) -> Router {
    let debate_path = state.config.server.debate_path.clone();

    Router::new()
        .route(&debate_path, any(debate_handler))
        .route(HEALTH_PATH, get(health_handler))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(state: SharedState) -> AppResult<()> {
    let addr = state.config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        addr = %addr,
        path = %state.config.server.debate_path,
        "Debate server listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
