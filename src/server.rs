// ABOUTME: HTTP server assembly: shared resources, router, and serve loop
// ABOUTME: Merges route modules and applies tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

//! HTTP server assembly
//!
//! [`ServerResources`] bundles the shared dependencies handlers need and
//! is passed around as a single `Arc` instead of cloning individual
//! resources into every route.

use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::routes::{AnalyticsRoutes, HealthRoutes, PreferenceRoutes};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared dependencies for all route handlers
pub struct ServerResources {
    /// Database handle (pooled, cheap to share)
    pub database: Database,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the server's shared dependencies
    #[must_use]
    pub const fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        Self { database, config }
    }
}

/// Weekly analytics HTTP server
pub struct AnalyticsServer {
    resources: Arc<ServerResources>,
}

impl AnalyticsServer {
    /// Create a server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    ///
    /// The mobile client is served from a different origin, so CORS is
    /// permissive; there is no cookie-based state to protect.
    #[must_use]
    pub fn router(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .merge(HealthRoutes::routes())
            .merge(AnalyticsRoutes::routes(resources.clone()))
            .merge(PreferenceRoutes::routes(resources))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind the configured port and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server loop
    /// fails.
    pub async fn run(self) -> AppResult<()> {
        let port = self.resources.config.http_port;
        let router = Self::router(self.resources);

        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind port {port}: {e}")))?;

        info!("HTTP server listening on port {port}");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, draining connections");
    }
}
