// ABOUTME: Muscle taxonomy database operations
// ABOUTME: Reads top-level muscle groups for focus selection and custom pickers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::MuscleGroup;
use sqlx::Row;

impl Database {
    /// List all top-level muscle groups, alphabetically
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn muscle_groups(&self) -> AppResult<Vec<MuscleGroup>> {
        let rows = sqlx::query(
            r"
            SELECT id, name FROM muscles
            WHERE parent_id IS NULL
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list muscle groups: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| MuscleGroup {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}
