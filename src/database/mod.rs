// ABOUTME: Database management for the analytics service
// ABOUTME: SQLite pool, schema migrations, and per-concern query modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

//! # Database Management
//!
//! Wraps a shared SQLite pool and runs idempotent schema migrations at
//! startup. Query code lives in per-concern modules: muscle taxonomy,
//! training preferences and warning dismissals, and weekly aggregation.

mod analytics;
mod muscles;
mod preferences;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for taxonomy, logs, preferences, and dismissals
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be opened or a migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails.
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_taxonomy().await?;
        self.migrate_workout_logs().await?;
        self.migrate_preferences().await?;
        Ok(())
    }

    /// Muscle taxonomy and exercise linkage tables
    async fn migrate_taxonomy(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS muscles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                parent_id INTEGER REFERENCES muscles(id),
                image_url TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_muscles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
                muscle_id INTEGER NOT NULL REFERENCES muscles(id) ON DELETE CASCADE,
                role TEXT NOT NULL DEFAULT 'primary',
                UNIQUE(exercise_id, muscle_id, role)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_muscles_muscle ON exercise_muscles(muscle_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_muscles_parent ON muscles(parent_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Exercise logging tables (written by the logging endpoints, read here)
    async fn migrate_workout_logs(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                log_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS set_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_log_id INTEGER NOT NULL REFERENCES workout_logs(id) ON DELETE CASCADE,
                reps INTEGER NOT NULL,
                weight REAL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_logs_user_date ON workout_logs(user_id, log_date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_set_logs_log ON set_logs(workout_log_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Training preference and warning dismissal tables
    async fn migrate_preferences(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_training_preferences (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE,
                training_focus TEXT NOT NULL DEFAULT 'full_body',
                custom_muscle_groups TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_warning_dismissals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                muscle_group_id INTEGER NOT NULL REFERENCES muscles(id),
                warning_type TEXT NOT NULL DEFAULT 'neglected',
                dismiss_count INTEGER NOT NULL DEFAULT 1,
                is_permanent BOOLEAN NOT NULL DEFAULT false,
                notes TEXT,
                last_seen_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(user_id, muscle_group_id, warning_type)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_warning_dismissals_user ON user_warning_dismissals(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
