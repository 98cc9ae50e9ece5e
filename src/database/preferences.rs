// ABOUTME: Training preference and warning dismissal database operations
// ABOUTME: Lazy default creation, upsert saves, and Smart Silence dismissal state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{DismissalState, TrainingFocus, TrainingPreferences, WarningDismissal};
use sqlx::Row;
use std::collections::HashMap;
use tracing::warn;

/// Decode the stored JSON array of group IDs, dropping anything malformed
fn decode_custom_groups(raw: Option<String>) -> Option<Vec<i64>> {
    let raw = raw?;
    match serde_json::from_str::<Vec<i64>>(&raw) {
        Ok(ids) => Some(ids),
        Err(e) => {
            warn!(error = %e, "Unreadable custom_muscle_groups value, ignoring");
            None
        }
    }
}

fn preferences_from_row(row: &sqlx::sqlite::SqliteRow) -> TrainingPreferences {
    let focus_raw: String = row.get("training_focus");
    let training_focus = focus_raw.parse().unwrap_or_else(|_| {
        warn!(value = %focus_raw, "Unknown training_focus in database, using full_body");
        TrainingFocus::FullBody
    });

    TrainingPreferences {
        id: row.get("id"),
        user_id: row.get("user_id"),
        training_focus,
        custom_muscle_groups: decode_custom_groups(row.get("custom_muscle_groups")),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Database {
    /// Fetch a user's training preferences, creating the default row on
    /// first read
    ///
    /// The create path is a plain insert: two concurrent first reads can
    /// race and one will surface a constraint error, which callers treat
    /// like any other database failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_or_create_preferences(&self, user_id: i64) -> AppResult<TrainingPreferences> {
        let existing = sqlx::query(
            r"
            SELECT id, user_id, training_focus, custom_muscle_groups, created_at, updated_at
            FROM user_training_preferences
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load preferences: {e}")))?;

        if let Some(row) = existing {
            return Ok(preferences_from_row(&row));
        }

        let result = sqlx::query(
            r"
            INSERT INTO user_training_preferences (user_id, training_focus)
            VALUES ($1, 'full_body')
            ",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create default preferences: {e}")))?;

        Ok(TrainingPreferences {
            id: result.last_insert_rowid(),
            user_id,
            training_focus: TrainingFocus::FullBody,
            custom_muscle_groups: None,
            created_at: None,
            updated_at: None,
        })
    }

    /// Load preferences for the analytics path, degrading to the
    /// `full_body` default instead of failing the request
    ///
    /// Preference storage rolled out after exercise logging; analytics
    /// must keep working against databases that predate it.
    pub async fn load_preferences_or_default(&self, user_id: i64) -> TrainingPreferences {
        match self.get_or_create_preferences(user_id).await {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(user_id, error = %e, "Preference load failed, using full_body default");
                TrainingPreferences {
                    id: 0,
                    user_id,
                    training_focus: TrainingFocus::FullBody,
                    custom_muscle_groups: None,
                    created_at: None,
                    updated_at: None,
                }
            }
        }
    }

    /// Save (insert or update) a user's training preferences
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails.
    pub async fn save_preferences(
        &self,
        user_id: i64,
        training_focus: TrainingFocus,
        custom_muscle_groups: Option<&[i64]>,
    ) -> AppResult<()> {
        let custom_json = custom_muscle_groups
            .map(|ids| serde_json::to_string(ids))
            .transpose()
            .map_err(|e| AppError::internal(format!("Failed to encode custom groups: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO user_training_preferences (user_id, training_focus, custom_muscle_groups)
            VALUES ($1, $2, $3)
            ON CONFLICT(user_id) DO UPDATE SET
                training_focus = excluded.training_focus,
                custom_muscle_groups = excluded.custom_muscle_groups,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(user_id)
        .bind(training_focus.as_str())
        .bind(custom_json)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save preferences: {e}")))?;

        Ok(())
    }

    /// Load the user's dismissal map keyed by `"{group_id}_{warning_type}"`,
    /// degrading to an empty map on failure
    pub async fn dismissals_or_default(&self, user_id: i64) -> HashMap<String, DismissalState> {
        let rows = sqlx::query(
            r"
            SELECT muscle_group_id, warning_type, dismiss_count, is_permanent
            FROM user_warning_dismissals
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;

        match rows {
            Ok(rows) => rows
                .into_iter()
                .map(|row| {
                    let group_id: i64 = row.get("muscle_group_id");
                    let warning_type: String = row.get("warning_type");
                    (
                        format!("{group_id}_{warning_type}"),
                        DismissalState {
                            count: row.get("dismiss_count"),
                            permanent: row.get("is_permanent"),
                        },
                    )
                })
                .collect(),
            Err(e) => {
                warn!(user_id, error = %e, "Dismissal load failed, no warnings suppressed");
                HashMap::new()
            }
        }
    }

    /// Record a warning dismissal, incrementing the counter on repeats
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn record_dismissal(
        &self,
        user_id: i64,
        muscle_group_id: i64,
        warning_type: &str,
        is_permanent: bool,
        notes: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_warning_dismissals
                (user_id, muscle_group_id, warning_type, dismiss_count, is_permanent, notes)
            VALUES ($1, $2, $3, 1, $4, $5)
            ON CONFLICT(user_id, muscle_group_id, warning_type) DO UPDATE SET
                dismiss_count = dismiss_count + 1,
                is_permanent = excluded.is_permanent,
                notes = excluded.notes,
                last_seen_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(user_id)
        .bind(muscle_group_id)
        .bind(warning_type)
        .bind(is_permanent)
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record dismissal: {e}")))?;

        Ok(())
    }

    /// Remove dismissals for one muscle group, or all of them
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn reset_dismissals(
        &self,
        user_id: i64,
        muscle_group_id: Option<i64>,
    ) -> AppResult<()> {
        let result = if let Some(group_id) = muscle_group_id {
            sqlx::query(
                "DELETE FROM user_warning_dismissals WHERE user_id = $1 AND muscle_group_id = $2",
            )
            .bind(user_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
        } else {
            sqlx::query("DELETE FROM user_warning_dismissals WHERE user_id = $1")
                .bind(user_id)
                .execute(&self.pool)
                .await
        };

        result.map_err(|e| AppError::database(format!("Failed to reset dismissals: {e}")))?;
        Ok(())
    }

    /// List a user's dismissals with group names, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_dismissals(&self, user_id: i64) -> AppResult<Vec<WarningDismissal>> {
        let rows = sqlx::query(
            r"
            SELECT d.id, d.user_id, d.muscle_group_id, m.name AS muscle_group_name,
                   d.warning_type, d.dismiss_count, d.is_permanent, d.notes, d.last_seen_at
            FROM user_warning_dismissals d
            JOIN muscles m ON m.id = d.muscle_group_id
            WHERE d.user_id = $1
            ORDER BY d.last_seen_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list dismissals: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| WarningDismissal {
                id: row.get("id"),
                user_id: row.get("user_id"),
                muscle_group_id: row.get("muscle_group_id"),
                muscle_group_name: row.get("muscle_group_name"),
                warning_type: row.get("warning_type"),
                dismiss_count: row.get("dismiss_count"),
                is_permanent: row.get("is_permanent"),
                notes: row.get("notes"),
                last_seen_at: row.get("last_seen_at"),
            })
            .collect())
    }
}
