// ABOUTME: HTTP server assembly for the routine recommender
// ABOUTME: Builds the axum router with its middleware stack and serves it until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! [`build_router`] is shared by the binary and the integration tests so
//! both exercise the same middleware stack:
//!
//! - request ID (outermost, so every log line of a request carries it)
//! - HTTP tracing
//! - request timeout
//! - body size limit
//! - CORS, on `/predict` only

use crate::config::ServerConfig;
use crate::constants::defaults;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::routes::{HealthRoutes, PredictRoutes};
use crate::services::RecommendationService;
use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Assemble every route and the shared middleware stack
#[must_use]
pub fn build_router(service: Arc<RecommendationService>, config: &ServerConfig) -> Router {
    let predict = PredictRoutes::routes(Arc::clone(&service)).layer(setup_cors(config));

    Router::new()
        .merge(predict)
        .merge(HealthRoutes::routes(service))
        .layer(DefaultBodyLimit::max(defaults::MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(
            defaults::REQUEST_TIMEOUT_SECS,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn serve(service: Arc<RecommendationService>, config: &ServerConfig) -> Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Listening on http://{address}");

    axum::serve(listener, build_router(service, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
