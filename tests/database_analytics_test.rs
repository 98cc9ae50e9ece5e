// ABOUTME: Integration tests for the weekly aggregation queries
// ABOUTME: Verifies role weighting, rollups, window bounds, and the drill-down cap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const START: (i32, u32, u32) = (2025, 6, 9);
const END: (i32, u32, u32) = (2025, 6, 15);

#[tokio::test]
async fn test_file_backed_database_is_created() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("analytics.db");
    let url = format!("sqlite:{}", path.display());

    let db = repwise_analytics::database::Database::new(&url).await?;
    assert!(path.exists());

    let taxonomy = common::seed_taxonomy(&db).await?;
    let groups = db
        .group_week_stats(1, date(START.0, START.1, START.2), date(END.0, END.1, END.2))
        .await?;
    assert_eq!(groups.len(), 4);
    assert!(groups.iter().any(|g| g.group_id == taxonomy.chest));

    Ok(())
}

#[tokio::test]
async fn test_sessions_count_distinct_dates() -> Result<()> {
    let db = common::create_test_database().await?;
    let taxonomy = common::seed_taxonomy(&db).await?;

    let squat = common::insert_exercise(&db, "Squat", &[(taxonomy.quads, "primary")]).await?;
    // Two workouts on the same day, one on another day
    common::log_single_set(&db, 1, squat, "2025-06-10", 5, Some(100.0)).await?;
    common::log_single_set(&db, 1, squat, "2025-06-10", 5, Some(100.0)).await?;
    common::log_single_set(&db, 1, squat, "2025-06-12", 5, Some(100.0)).await?;

    let muscles = db
        .muscle_week_stats(1, date(START.0, START.1, START.2), date(END.0, END.1, END.2))
        .await?;
    let quads = muscles
        .iter()
        .find(|m| m.muscle_name == "Quads")
        .unwrap();

    assert_eq!(quads.sessions, 2);
    assert_eq!(quads.total_sets, 3);
    assert_eq!(quads.total_reps, 15);
    assert_eq!(quads.total_exercises, 1);
    assert_eq!(quads.first_date.as_deref(), Some("2025-06-10"));
    assert_eq!(quads.last_date.as_deref(), Some("2025-06-12"));

    Ok(())
}

#[tokio::test]
async fn test_unlisted_role_gets_quarter_weight() -> Result<()> {
    let db = common::create_test_database().await?;
    let taxonomy = common::seed_taxonomy(&db).await?;

    let plank = common::insert_exercise(&db, "Plank", &[(taxonomy.lats, "stabilizer")]).await?;
    common::log_single_set(&db, 1, plank, "2025-06-10", 4, Some(10.0)).await?;

    let muscles = db
        .muscle_week_stats(1, date(START.0, START.1, START.2), date(END.0, END.1, END.2))
        .await?;
    let lats = muscles.iter().find(|m| m.muscle_name == "Lats").unwrap();

    // 4 reps x 10kg x 0.25
    assert!((lats.total_load - 10.0).abs() < 1e-9);
    assert_eq!(lats.total_sets, 0);

    Ok(())
}

#[tokio::test]
async fn test_group_rollup_includes_direct_linkage() -> Result<()> {
    let db = common::create_test_database().await?;
    let taxonomy = common::seed_taxonomy(&db).await?;

    // Linked to the Chest group itself, not a sub-muscle
    let press = common::insert_exercise(&db, "Machine Press", &[(taxonomy.chest, "primary")])
        .await?;
    common::log_single_set(&db, 1, press, "2025-06-10", 10, Some(30.0)).await?;

    let groups = db
        .group_week_stats(1, date(START.0, START.1, START.2), date(END.0, END.1, END.2))
        .await?;
    let chest = groups.iter().find(|g| g.group_name == "Chest").unwrap();

    assert!((chest.total_load - 300.0).abs() < 1e-9);
    assert_eq!(chest.total_sets, 1);

    // Sub-muscle stats stay untouched by the direct linkage
    let muscles = db
        .muscle_week_stats(1, date(START.0, START.1, START.2), date(END.0, END.1, END.2))
        .await?;
    let pectorals = muscles
        .iter()
        .find(|m| m.muscle_name == "Pectorals")
        .unwrap();
    assert!((pectorals.total_load).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn test_window_bounds_are_inclusive() -> Result<()> {
    let db = common::create_test_database().await?;
    let taxonomy = common::seed_taxonomy(&db).await?;

    let bench = common::insert_exercise(&db, "Bench Press", &[(taxonomy.pectorals, "primary")])
        .await?;
    common::log_single_set(&db, 1, bench, "2025-06-08", 10, Some(50.0)).await?; // before
    common::log_single_set(&db, 1, bench, "2025-06-09", 10, Some(50.0)).await?; // first day
    common::log_single_set(&db, 1, bench, "2025-06-15", 10, Some(50.0)).await?; // last day
    common::log_single_set(&db, 1, bench, "2025-06-16", 10, Some(50.0)).await?; // after

    let muscles = db
        .muscle_week_stats(1, date(START.0, START.1, START.2), date(END.0, END.1, END.2))
        .await?;
    let pectorals = muscles
        .iter()
        .find(|m| m.muscle_name == "Pectorals")
        .unwrap();

    assert!((pectorals.total_load - 1000.0).abs() < 1e-9);
    assert_eq!(pectorals.sessions, 2);

    Ok(())
}

#[tokio::test]
async fn test_other_users_are_excluded() -> Result<()> {
    let db = common::create_test_database().await?;
    let taxonomy = common::seed_taxonomy(&db).await?;

    let bench = common::insert_exercise(&db, "Bench Press", &[(taxonomy.pectorals, "primary")])
        .await?;
    common::log_single_set(&db, 1, bench, "2025-06-10", 10, Some(50.0)).await?;
    common::log_single_set(&db, 2, bench, "2025-06-10", 10, Some(80.0)).await?;

    let muscles = db
        .muscle_week_stats(1, date(START.0, START.1, START.2), date(END.0, END.1, END.2))
        .await?;
    let pectorals = muscles
        .iter()
        .find(|m| m.muscle_name == "Pectorals")
        .unwrap();

    assert!((pectorals.total_load - 500.0).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn test_top_exercises_capped_and_ordered() -> Result<()> {
    let db = common::create_test_database().await?;
    let taxonomy = common::seed_taxonomy(&db).await?;

    // Twelve exercises with strictly decreasing load
    for i in 0..12 {
        let name = format!("Exercise {i}");
        let exercise =
            common::insert_exercise(&db, &name, &[(taxonomy.pectorals, "primary")]).await?;
        let weight = f64::from(120 - i * 10);
        common::log_single_set(&db, 1, exercise, "2025-06-10", 10, Some(weight)).await?;
    }

    let buckets = db
        .top_exercises_by_muscle(1, date(START.0, START.1, START.2), date(END.0, END.1, END.2))
        .await?;
    let top = buckets.get(&taxonomy.pectorals).unwrap();

    assert_eq!(top.len(), 10);
    assert_eq!(top[0].exercise_name, "Exercise 0");
    for pair in top.windows(2) {
        assert!(pair[0].load >= pair[1].load);
    }

    Ok(())
}
