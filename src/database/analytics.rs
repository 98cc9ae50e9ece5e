// ABOUTME: Weekly training-load aggregation queries per muscle and muscle group
// ABOUTME: Computes weighted load, primary-only set metrics, and top exercises for a week window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

//! Weekly aggregation over logged exercise sets.
//!
//! Each pass runs two queries: an any-role pass for the weighted load
//! (`reps x COALESCE(NULLIF(weight,0),1) x role weight`) and a
//! primary-only pass for set/session/rep counts, merged by id. Splitting
//! keeps the two join fans from cross-multiplying each other's sums.
//! Muscles and groups with no activity in the window still get a row, so
//! the client can render "not trained this week" instead of a gap.

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseStat, GroupStat, MuscleStat};
use chrono::NaiveDate;
use sqlx::Row;
use std::collections::HashMap;

/// Drill-down exercise lists are capped per muscle/group
const MAX_TOP_EXERCISES: usize = 10;

/// Weighted-intensity expression shared by every aggregation query
const LOAD_EXPR: &str = "(sl.reps * COALESCE(NULLIF(sl.weight, 0), 1)) * \
     CASE WHEN em.role = 'primary' THEN 1.0 \
          WHEN em.role = 'secondary' THEN 0.5 \
          ELSE 0.25 END";

/// Primary-only counters merged into the load rows
struct PrimaryMetrics {
    total_sets: i64,
    sessions: i64,
    total_reps: i64,
}

impl Database {
    /// Weekly aggregates for every sub-muscle (zero rows included)
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn muscle_week_stats(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<MuscleStat>> {
        let load_sql = format!(
            r"
            SELECT m.id AS muscle_id, m.name AS muscle_name, m.parent_id AS group_id,
                   m.image_url AS image_url,
                   COALESCE(SUM({LOAD_EXPR}), 0.0) AS total_load,
                   COUNT(DISTINCT wl.exercise_id) AS total_exercises,
                   MIN(wl.log_date) AS first_date,
                   MAX(wl.log_date) AS last_date
            FROM muscles m
            LEFT JOIN exercise_muscles em ON em.muscle_id = m.id
            LEFT JOIN workout_logs wl ON wl.exercise_id = em.exercise_id
                AND wl.user_id = $1 AND wl.log_date BETWEEN $2 AND $3
            LEFT JOIN set_logs sl ON sl.workout_log_id = wl.id
            WHERE m.parent_id IS NOT NULL
            GROUP BY m.id, m.name, m.parent_id, m.image_url
            ORDER BY m.name ASC
            "
        );

        let rows = sqlx::query(&load_sql)
            .bind(user_id)
            .bind(start.to_string())
            .bind(end.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to aggregate muscle loads: {e}")))?;

        let primary_sql = r"
            SELECT m.id AS muscle_id,
                   COUNT(DISTINCT sl.id) AS total_sets,
                   COUNT(DISTINCT wl.log_date) AS sessions,
                   COALESCE(SUM(sl.reps), 0) AS total_reps
            FROM muscles m
            LEFT JOIN exercise_muscles em ON em.muscle_id = m.id AND em.role = 'primary'
            LEFT JOIN workout_logs wl ON wl.exercise_id = em.exercise_id
                AND wl.user_id = $1 AND wl.log_date BETWEEN $2 AND $3
            LEFT JOIN set_logs sl ON sl.workout_log_id = wl.id
            WHERE m.parent_id IS NOT NULL
            GROUP BY m.id
            ";

        let primary = self
            .primary_metrics(primary_sql, "muscle_id", user_id, start, end)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let muscle_id: i64 = row.get("muscle_id");
                let counters = primary.get(&muscle_id);
                MuscleStat {
                    muscle_id,
                    muscle_name: row.get("muscle_name"),
                    group_id: row.get("group_id"),
                    total_load: row.get("total_load"),
                    total_sets: counters.map_or(0, |c| c.total_sets),
                    sessions: counters.map_or(0, |c| c.sessions),
                    total_reps: counters.map_or(0, |c| c.total_reps),
                    total_exercises: row.get("total_exercises"),
                    first_date: row.get("first_date"),
                    last_date: row.get("last_date"),
                    image_url: row.get("image_url"),
                    exercises: Vec::new(),
                }
            })
            .collect())
    }

    /// Weekly aggregates for every top-level group, rolled up over the
    /// group itself plus its children (zero rows included)
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn group_week_stats(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<GroupStat>> {
        let load_sql = format!(
            r"
            SELECT g.id AS group_id, g.name AS group_name, g.image_url AS image_url,
                   COALESCE(SUM({LOAD_EXPR}), 0.0) AS total_load,
                   COUNT(DISTINCT wl.exercise_id) AS total_exercises
            FROM muscles g
            LEFT JOIN muscles m ON m.id = g.id OR m.parent_id = g.id
            LEFT JOIN exercise_muscles em ON em.muscle_id = m.id
            LEFT JOIN workout_logs wl ON wl.exercise_id = em.exercise_id
                AND wl.user_id = $1 AND wl.log_date BETWEEN $2 AND $3
            LEFT JOIN set_logs sl ON sl.workout_log_id = wl.id
            WHERE g.parent_id IS NULL
            GROUP BY g.id, g.name, g.image_url
            ORDER BY g.name ASC
            "
        );

        let rows = sqlx::query(&load_sql)
            .bind(user_id)
            .bind(start.to_string())
            .bind(end.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to aggregate group loads: {e}")))?;

        let primary_sql = r"
            SELECT g.id AS group_id,
                   COUNT(DISTINCT sl.id) AS total_sets,
                   COUNT(DISTINCT wl.log_date) AS sessions,
                   COALESCE(SUM(sl.reps), 0) AS total_reps
            FROM muscles g
            LEFT JOIN muscles m ON m.id = g.id OR m.parent_id = g.id
            LEFT JOIN exercise_muscles em ON em.muscle_id = m.id AND em.role = 'primary'
            LEFT JOIN workout_logs wl ON wl.exercise_id = em.exercise_id
                AND wl.user_id = $1 AND wl.log_date BETWEEN $2 AND $3
            LEFT JOIN set_logs sl ON sl.workout_log_id = wl.id
            WHERE g.parent_id IS NULL
            GROUP BY g.id
            ";

        let primary = self
            .primary_metrics(primary_sql, "group_id", user_id, start, end)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let group_id: i64 = row.get("group_id");
                let counters = primary.get(&group_id);
                GroupStat {
                    group_id,
                    group_name: row.get("group_name"),
                    total_load: row.get("total_load"),
                    total_sets: counters.map_or(0, |c| c.total_sets),
                    sessions: counters.map_or(0, |c| c.sessions),
                    total_reps: counters.map_or(0, |c| c.total_reps),
                    total_exercises: row.get("total_exercises"),
                    image_url: row.get("image_url"),
                    exercises: Vec::new(),
                }
            })
            .collect())
    }

    /// Top exercises by weighted intensity, bucketed per group id
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn top_exercises_by_group(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<HashMap<i64, Vec<ExerciseStat>>> {
        let sql = format!(
            r"
            SELECT COALESCE(parent.id, m.id) AS bucket_id,
                   e.id AS exercise_id, e.name AS exercise_name,
                   COALESCE(SUM(CASE WHEN em.role = 'primary' THEN 1 ELSE 0 END), 0) AS sets,
                   COALESCE(SUM(CASE WHEN em.role = 'primary' THEN sl.reps ELSE 0 END), 0) AS reps,
                   COALESCE(SUM({LOAD_EXPR}), 0.0) AS intensity
            FROM workout_logs wl
            JOIN exercises e ON e.id = wl.exercise_id
            JOIN exercise_muscles em ON em.exercise_id = wl.exercise_id
            JOIN muscles m ON m.id = em.muscle_id
            LEFT JOIN muscles parent ON m.parent_id = parent.id
            LEFT JOIN set_logs sl ON sl.workout_log_id = wl.id
            WHERE wl.user_id = $1 AND wl.log_date BETWEEN $2 AND $3
            GROUP BY bucket_id, e.id, e.name
            ORDER BY bucket_id ASC, intensity DESC
            "
        );

        self.top_exercise_buckets(&sql, user_id, start, end).await
    }

    /// Top exercises by weighted intensity, bucketed per sub-muscle id
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn top_exercises_by_muscle(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<HashMap<i64, Vec<ExerciseStat>>> {
        let sql = format!(
            r"
            SELECT m.id AS bucket_id,
                   e.id AS exercise_id, e.name AS exercise_name,
                   COALESCE(SUM(CASE WHEN em.role = 'primary' THEN 1 ELSE 0 END), 0) AS sets,
                   COALESCE(SUM(CASE WHEN em.role = 'primary' THEN sl.reps ELSE 0 END), 0) AS reps,
                   COALESCE(SUM({LOAD_EXPR}), 0.0) AS intensity
            FROM workout_logs wl
            JOIN exercises e ON e.id = wl.exercise_id
            JOIN exercise_muscles em ON em.exercise_id = wl.exercise_id
            JOIN muscles m ON m.id = em.muscle_id
            LEFT JOIN set_logs sl ON sl.workout_log_id = wl.id
            WHERE wl.user_id = $1 AND wl.log_date BETWEEN $2 AND $3
            GROUP BY m.id, e.id, e.name
            ORDER BY m.id ASC, intensity DESC
            "
        );

        self.top_exercise_buckets(&sql, user_id, start, end).await
    }

    /// Run a primary-only counter query and index the rows by id
    async fn primary_metrics(
        &self,
        sql: &str,
        id_column: &str,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<HashMap<i64, PrimaryMetrics>> {
        let rows = sqlx::query(sql)
            .bind(user_id)
            .bind(start.to_string())
            .bind(end.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to aggregate primary sets: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.get::<i64, _>(id_column),
                    PrimaryMetrics {
                        total_sets: row.get("total_sets"),
                        sessions: row.get("sessions"),
                        total_reps: row.get("total_reps"),
                    },
                )
            })
            .collect())
    }

    /// Run a top-exercise query and bucket rows per id, capped at
    /// [`MAX_TOP_EXERCISES`] (rows arrive ordered by intensity)
    async fn top_exercise_buckets(
        &self,
        sql: &str,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<HashMap<i64, Vec<ExerciseStat>>> {
        let rows = sqlx::query(sql)
            .bind(user_id)
            .bind(start.to_string())
            .bind(end.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to rank exercises: {e}")))?;

        let mut buckets: HashMap<i64, Vec<ExerciseStat>> = HashMap::new();
        for row in rows {
            let bucket_id: i64 = row.get("bucket_id");
            let bucket = buckets.entry(bucket_id).or_default();
            if bucket.len() < MAX_TOP_EXERCISES {
                bucket.push(ExerciseStat {
                    exercise_id: row.get("exercise_id"),
                    exercise_name: row.get("exercise_name"),
                    sets: row.get("sets"),
                    reps: row.get("reps"),
                    load: row.get("intensity"),
                });
            }
        }

        Ok(buckets)
    }
}
