// ABOUTME: Weekly insight derivation pipeline from aggregates to report
// ABOUTME: Orchestrates preferences, aggregation, classification, and response shaping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

//! # Weekly Training Insights
//!
//! Three stages, run per request: preference resolution (training focus
//! plus dismissed warnings), load aggregation over the week window, and
//! insight derivation (classification, warning suppression, summary).
//! The pipeline only reads; its single side effect is the lazy creation
//! of a default preference row on a user's first request.

/// Focused/neglected classification and Smart Silence suppression
pub mod classifier;
/// Training-focus scope resolution
pub mod focus;
/// Summary string composition
pub mod summary;
/// Week window resolution
pub mod week;

use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{DebugCounts, WeeklyReport};
use std::collections::BTreeMap;
use week::WeekWindow;

/// Build the full weekly analytics report for one user and window
///
/// # Errors
///
/// Returns an error if an aggregation query fails. Preference and
/// dismissal loading degrade to defaults instead of failing.
pub async fn build_weekly_report(
    database: &Database,
    user_id: i64,
    window: WeekWindow,
) -> AppResult<WeeklyReport> {
    let preferences = database.load_preferences_or_default(user_id).await;
    let dismissed = database.dismissals_or_default(user_id).await;

    let mut muscles = database
        .muscle_week_stats(user_id, window.start, window.end)
        .await?;
    let mut groups = database
        .group_week_stats(user_id, window.start, window.end)
        .await?;

    let mut by_muscle = database
        .top_exercises_by_muscle(user_id, window.start, window.end)
        .await?;
    for muscle in &mut muscles {
        if let Some(exercises) = by_muscle.remove(&muscle.muscle_id) {
            muscle.exercises = exercises;
        }
    }

    let mut by_group = database
        .top_exercises_by_group(user_id, window.start, window.end)
        .await?;
    for group in &mut groups {
        if let Some(exercises) = by_group.remove(&group.group_id) {
            group.exercises = exercises;
        }
    }

    let averages = classifier::week_averages(&groups);
    let tracked = focus::tracked_group_ids(
        preferences.training_focus,
        preferences.custom_muscle_groups.as_deref(),
        &groups,
    );

    let classification = classifier::classify_groups(&groups, &tracked, averages);
    let warnings = classifier::neglect_warnings(&classification.neglected, &dismissed);

    let neglected_names: Vec<String> = classification
        .neglected
        .iter()
        .map(|g| g.group_name.clone())
        .collect();

    let summary = summary::compose_summary(
        &classification.focused,
        &neglected_names,
        preferences.training_focus,
    );

    Ok(WeeklyReport {
        week_start: window.start.to_string(),
        week_end: window.end.to_string(),
        muscles,
        groups,
        averages,
        summary,
        focused_groups: classification.focused,
        neglected_groups: neglected_names,
        warnings,
        training_focus: preferences.training_focus,
        tracked_muscle_groups: tracked,
    })
}

/// Diagnostic counts for `debug=1` requests
#[must_use]
pub fn debug_counts(report: &WeeklyReport) -> DebugCounts {
    let mut muscles_by_group: BTreeMap<i64, i64> = BTreeMap::new();
    for muscle in &report.muscles {
        if let Some(group_id) = muscle.group_id {
            *muscles_by_group.entry(group_id).or_insert(0) += 1;
        }
    }

    DebugCounts {
        group_count: report.groups.len(),
        muscle_count: report.muscles.len(),
        group_ids: report.groups.iter().map(|g| g.group_id).collect(),
        muscles_by_group,
    }
}
