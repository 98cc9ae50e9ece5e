// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database seeding and HTTP request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `repwise_analytics`
//!
//! Common setup for integration tests: quiet logging, an in-memory
//! database with the schema migrated, taxonomy and workout seeding, and
//! `oneshot` helpers for exercising the router without a socket.

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use repwise_analytics::{
    config::environment::ServerConfig,
    database::Database,
    server::{AnalyticsServer, ServerResources},
};
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup (in-memory, schema migrated)
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Full application router backed by a fresh in-memory database
pub async fn create_test_app() -> Result<(Database, Router)> {
    let database = create_test_database().await?;
    let resources = Arc::new(ServerResources::new(
        database.clone(),
        Arc::new(ServerConfig::default()),
    ));
    Ok((database, AnalyticsServer::router(resources)))
}

/// IDs of the seeded taxonomy rows
pub struct Taxonomy {
    pub chest: i64,
    pub back: i64,
    pub arms: i64,
    pub legs: i64,
    pub pectorals: i64,
    pub lats: i64,
    pub triceps: i64,
    pub quads: i64,
}

/// Seed four top-level groups, each with one sub-muscle
pub async fn seed_taxonomy(db: &Database) -> Result<Taxonomy> {
    let chest = insert_muscle(db, "Chest", None).await?;
    let back = insert_muscle(db, "Back", None).await?;
    let arms = insert_muscle(db, "Arms", None).await?;
    let legs = insert_muscle(db, "Legs", None).await?;

    let pectorals = insert_muscle(db, "Pectorals", Some(chest)).await?;
    let lats = insert_muscle(db, "Lats", Some(back)).await?;
    let triceps = insert_muscle(db, "Triceps", Some(arms)).await?;
    let quads = insert_muscle(db, "Quads", Some(legs)).await?;

    Ok(Taxonomy {
        chest,
        back,
        arms,
        legs,
        pectorals,
        lats,
        triceps,
        quads,
    })
}

/// Insert one taxonomy row and return its id
pub async fn insert_muscle(db: &Database, name: &str, parent_id: Option<i64>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO muscles (name, parent_id) VALUES ($1, $2)")
        .bind(name)
        .bind(parent_id)
        .execute(db.pool())
        .await?;
    Ok(result.last_insert_rowid())
}

/// Insert an exercise with its muscle linkages (`(muscle_id, role)` pairs)
pub async fn insert_exercise(db: &Database, name: &str, muscles: &[(i64, &str)]) -> Result<i64> {
    let result = sqlx::query("INSERT INTO exercises (name) VALUES ($1)")
        .bind(name)
        .execute(db.pool())
        .await?;
    let exercise_id = result.last_insert_rowid();

    for (muscle_id, role) in muscles {
        sqlx::query(
            "INSERT INTO exercise_muscles (exercise_id, muscle_id, role) VALUES ($1, $2, $3)",
        )
        .bind(exercise_id)
        .bind(muscle_id)
        .bind(role)
        .execute(db.pool())
        .await?;
    }

    Ok(exercise_id)
}

/// Log one workout entry and return its id
pub async fn log_workout(db: &Database, user_id: i64, exercise_id: i64, date: &str) -> Result<i64> {
    let result =
        sqlx::query("INSERT INTO workout_logs (user_id, exercise_id, log_date) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(exercise_id)
            .bind(date)
            .execute(db.pool())
            .await?;
    Ok(result.last_insert_rowid())
}

/// Log one set against a workout entry
pub async fn log_set(db: &Database, workout_log_id: i64, reps: i64, weight: Option<f64>) -> Result<()> {
    sqlx::query("INSERT INTO set_logs (workout_log_id, reps, weight) VALUES ($1, $2, $3)")
        .bind(workout_log_id)
        .bind(reps)
        .bind(weight)
        .execute(db.pool())
        .await?;
    Ok(())
}

/// Convenience: log a workout with a single set
pub async fn log_single_set(
    db: &Database,
    user_id: i64,
    exercise_id: i64,
    date: &str,
    reps: i64,
    weight: Option<f64>,
) -> Result<()> {
    let workout_id = log_workout(db, user_id, exercise_id, date).await?;
    log_set(db, workout_id, reps, weight).await
}

/// Send a GET request through the router and decode the JSON body
///
/// Every endpoint answers HTTP 200, success and failure alike.
pub async fn get_json(app: &Router, uri: &str) -> Result<serde_json::Value> {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Send a POST request with a JSON body and decode the JSON response
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> Result<serde_json::Value> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(body)?))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
