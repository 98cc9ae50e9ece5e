// ABOUTME: Training preference and warning dismissal route handlers
// ABOUTME: CRUD for per-user focus settings and Smart Silence dismissal records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

use crate::errors::{AppError, AppResult};
use crate::insights::classifier::WARNING_NEGLECTED;
use crate::models::{ApiData, ApiMessage, MuscleGroup, TrainingPreferences, WarningDismissal};
use crate::server::ServerResources;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Query parameters for user-scoped GET endpoints
#[derive(Debug, Deserialize)]
pub struct UserParams {
    /// Target user
    pub user_id: Option<i64>,
}

/// Request body for saving training preferences
#[derive(Debug, Deserialize)]
pub struct SavePreferencesRequest {
    /// Target user
    pub user_id: Option<i64>,
    /// Focus name: `full_body`, `upper_body`, `lower_body`, or `custom`
    pub training_focus: Option<String>,
    /// Explicit group IDs, meaningful when focus is `custom`
    pub custom_muscle_groups: Option<Vec<i64>>,
}

/// Request body for dismissing a warning
#[derive(Debug, Deserialize)]
pub struct DismissWarningRequest {
    /// Target user
    pub user_id: Option<i64>,
    /// Group the warning refers to
    pub muscle_group_id: Option<i64>,
    /// Warning category; defaults to `neglected`
    pub warning_type: Option<String>,
    /// Never show this warning again
    #[serde(default)]
    pub is_permanent: bool,
    /// Optional user note
    pub notes: Option<String>,
}

/// Request body for resetting dismissals
#[derive(Debug, Deserialize)]
pub struct ResetWarningsRequest {
    /// Target user
    pub user_id: Option<i64>,
    /// Limit the reset to one group; omit to reset all
    pub muscle_group_id: Option<i64>,
}

fn require_user_id(user_id: Option<i64>) -> AppResult<i64> {
    match user_id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_input("Missing or invalid user_id")),
    }
}

/// Preference routes implementation
pub struct PreferenceRoutes;

impl PreferenceRoutes {
    /// Create all preference and dismissal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/preferences", get(Self::get_preferences))
            .route("/preferences", post(Self::save_preferences))
            .route(
                "/preferences/warnings/dismiss",
                post(Self::dismiss_warning),
            )
            .route("/preferences/warnings/reset", post(Self::reset_warnings))
            .route("/preferences/warnings", get(Self::list_warnings))
            .route("/muscle-groups", get(Self::list_muscle_groups))
            .with_state(resources)
    }

    /// Handle `GET /preferences`
    async fn get_preferences(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<UserParams>,
    ) -> AppResult<Json<ApiData<TrainingPreferences>>> {
        let user_id = require_user_id(params.user_id)?;
        let preferences = resources.database.get_or_create_preferences(user_id).await?;
        Ok(Json(ApiData::new(preferences)))
    }

    /// Handle `POST /preferences`
    async fn save_preferences(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SavePreferencesRequest>,
    ) -> AppResult<Json<ApiMessage>> {
        let user_id = require_user_id(request.user_id)?;
        let focus = request
            .training_focus
            .as_deref()
            .ok_or_else(|| AppError::invalid_input("Missing training_focus"))?
            .parse()?;

        resources
            .database
            .save_preferences(user_id, focus, request.custom_muscle_groups.as_deref())
            .await?;

        info!(user_id, focus = %focus, "Training preferences saved");
        Ok(Json(ApiMessage::new("Preferences saved")))
    }

    /// Handle `POST /preferences/warnings/dismiss`
    async fn dismiss_warning(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<DismissWarningRequest>,
    ) -> AppResult<Json<ApiMessage>> {
        let user_id = require_user_id(request.user_id)?;
        let muscle_group_id = match request.muscle_group_id {
            Some(id) if id > 0 => id,
            _ => {
                return Err(AppError::invalid_input(
                    "Missing or invalid muscle_group_id",
                ))
            }
        };
        let warning_type = request.warning_type.as_deref().unwrap_or(WARNING_NEGLECTED);

        resources
            .database
            .record_dismissal(
                user_id,
                muscle_group_id,
                warning_type,
                request.is_permanent,
                request.notes.as_deref(),
            )
            .await?;

        info!(
            user_id,
            muscle_group_id,
            warning_type,
            permanent = request.is_permanent,
            "Warning dismissed"
        );
        Ok(Json(ApiMessage::new("Warning dismissed")))
    }

    /// Handle `POST /preferences/warnings/reset`
    async fn reset_warnings(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ResetWarningsRequest>,
    ) -> AppResult<Json<ApiMessage>> {
        let user_id = require_user_id(request.user_id)?;

        resources
            .database
            .reset_dismissals(user_id, request.muscle_group_id)
            .await?;

        info!(user_id, group = ?request.muscle_group_id, "Warning dismissals reset");
        Ok(Json(ApiMessage::new("Warnings reset")))
    }

    /// Handle `GET /preferences/warnings`
    async fn list_warnings(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<UserParams>,
    ) -> AppResult<Json<ApiData<Vec<WarningDismissal>>>> {
        let user_id = require_user_id(params.user_id)?;
        let dismissals = resources.database.list_dismissals(user_id).await?;
        Ok(Json(ApiData::new(dismissals)))
    }

    /// Handle `GET /muscle-groups`
    async fn list_muscle_groups(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<ApiData<Vec<MuscleGroup>>>> {
        let groups = resources.database.muscle_groups().await?;
        Ok(Json(ApiData::new(groups)))
    }
}
