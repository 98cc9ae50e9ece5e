// ABOUTME: Weekly muscle analytics route handler
// ABOUTME: Validates query parameters and runs the weekly report pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

use crate::errors::{AppError, AppResult};
use crate::insights::{self, week::WeekWindow};
use crate::models::{ApiData, WeeklyReport};
use crate::server::ServerResources;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Query parameters accepted by the weekly analytics endpoint
#[derive(Debug, Deserialize)]
pub struct WeeklyParams {
    /// Requested action; only `weekly` is supported and it is the default
    pub action: Option<String>,
    /// Target user
    pub user_id: Option<i64>,
    /// Explicit window start (`YYYY-MM-DD`); defaults to this week's Monday
    pub week_start: Option<String>,
    /// Pass `1` to append diagnostic counts to the response
    pub debug: Option<String>,
}

/// Analytics routes implementation
pub struct AnalyticsRoutes;

impl AnalyticsRoutes {
    /// Create all analytics routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/analytics/weekly", get(Self::weekly_handler))
            .with_state(resources)
    }

    /// Handle `GET /analytics/weekly`
    async fn weekly_handler(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<WeeklyParams>,
    ) -> AppResult<Json<ApiData<WeeklyReport>>> {
        if let Some(action) = params.action.as_deref() {
            if action != "weekly" {
                return Err(AppError::invalid_input(format!(
                    "Unsupported action: {action}"
                )));
            }
        }

        let user_id = match params.user_id {
            Some(id) if id > 0 => id,
            _ => return Err(AppError::invalid_input("Missing or invalid user_id")),
        };

        let window = WeekWindow::resolve_now(params.week_start.as_deref())?;
        debug!(user_id, week_start = %window.start, "Building weekly report");

        let report =
            insights::build_weekly_report(&resources.database, user_id, window).await?;

        let mut envelope = ApiData::new(report);
        if params.debug.as_deref() == Some("1") {
            let counts = insights::debug_counts(&envelope.data);
            envelope = envelope.with_debug(counts);
        }

        Ok(Json(envelope))
    }
}
