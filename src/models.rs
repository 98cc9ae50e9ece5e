// ABOUTME: Common data models for muscle taxonomy, weekly aggregates, and API payloads
// ABOUTME: Typed row structs replace loose JSON maps end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

//! Common data models
//!
//! Every SQL result is mapped into an explicit struct here before it is
//! classified or serialized, so field types are fixed at the database
//! boundary rather than at the JSON encoder.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// User training focus: which muscle groups are tracked for insights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingFocus {
    /// Track every muscle group
    #[default]
    FullBody,
    /// Track chest, back, shoulders, arms, core
    UpperBody,
    /// Track legs, glutes, calves
    LowerBody,
    /// Track an explicit user-chosen set of groups
    Custom,
}

impl TrainingFocus {
    /// Canonical wire name of this focus
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullBody => "full_body",
            Self::UpperBody => "upper_body",
            Self::LowerBody => "lower_body",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TrainingFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingFocus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_body" => Ok(Self::FullBody),
            "upper_body" => Ok(Self::UpperBody),
            "lower_body" => Ok(Self::LowerBody),
            "custom" => Ok(Self::Custom),
            other => Err(AppError::invalid_format(format!(
                "Invalid training_focus value: {other}"
            ))),
        }
    }
}

/// Per-user training preference row
#[derive(Debug, Clone, Serialize)]
pub struct TrainingPreferences {
    /// Row id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Selected training focus
    pub training_focus: TrainingFocus,
    /// Explicit group IDs when focus is `custom`
    pub custom_muscle_groups: Option<Vec<i64>>,
    /// Creation timestamp (database-local format)
    pub created_at: Option<String>,
    /// Last-update timestamp (database-local format)
    pub updated_at: Option<String>,
}

/// Recorded dismissal of a muscle-group warning
#[derive(Debug, Clone, Serialize)]
pub struct WarningDismissal {
    /// Row id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Dismissed muscle group
    pub muscle_group_id: i64,
    /// Group name (joined for display)
    pub muscle_group_name: String,
    /// Warning category, e.g. `neglected`
    pub warning_type: String,
    /// How many times the user dismissed this warning
    pub dismiss_count: i64,
    /// Whether the user asked never to be warned again
    pub is_permanent: bool,
    /// Optional user note
    pub notes: Option<String>,
    /// Last time the warning was dismissed
    pub last_seen_at: Option<String>,
}

/// Compact dismissal state keyed by `"{group_id}_{warning_type}"`
#[derive(Debug, Clone, Copy)]
pub struct DismissalState {
    /// Dismiss counter
    pub count: i64,
    /// Permanent-dismissal flag
    pub permanent: bool,
}

/// Top-level muscle group (taxonomy row with no parent)
#[derive(Debug, Clone, Serialize)]
pub struct MuscleGroup {
    /// Group id
    pub id: i64,
    /// Group name, e.g. `Chest`
    pub name: String,
}

/// One exercise's contribution to a muscle or group for the week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseStat {
    /// Exercise id
    pub exercise_id: i64,
    /// Exercise name
    pub exercise_name: String,
    /// Primary-role set count
    pub sets: i64,
    /// Primary-role rep total
    pub reps: i64,
    /// Weighted intensity (reps x weight x role weight)
    pub load: f64,
}

/// Weekly aggregate for a single sub-muscle
#[derive(Debug, Clone, Serialize)]
pub struct MuscleStat {
    /// Muscle id
    pub muscle_id: i64,
    /// Muscle name
    pub muscle_name: String,
    /// Parent group id
    pub group_id: Option<i64>,
    /// Weighted load across all role linkages
    pub total_load: f64,
    /// Distinct sets (primary role only)
    pub total_sets: i64,
    /// Distinct training dates (primary role only)
    pub sessions: i64,
    /// Total reps (primary role only)
    pub total_reps: i64,
    /// Distinct exercises performed (any role)
    pub total_exercises: i64,
    /// First training date within the week
    pub first_date: Option<String>,
    /// Last training date within the week
    pub last_date: Option<String>,
    /// Illustration URL for the mobile UI
    pub image_url: Option<String>,
    /// Top exercises by intensity (max 10)
    pub exercises: Vec<ExerciseStat>,
}

/// Weekly aggregate for a top-level muscle group (group + its children)
#[derive(Debug, Clone, Serialize)]
pub struct GroupStat {
    /// Group id
    pub group_id: i64,
    /// Group name
    pub group_name: String,
    /// Weighted load across all role linkages
    pub total_load: f64,
    /// Distinct sets (primary role only)
    pub total_sets: i64,
    /// Distinct training dates (primary role only)
    pub sessions: i64,
    /// Total reps (primary role only)
    pub total_reps: i64,
    /// Distinct exercises performed (any role)
    pub total_exercises: i64,
    /// Illustration URL for the mobile UI
    pub image_url: Option<String>,
    /// Top exercises by intensity (max 10)
    pub exercises: Vec<ExerciseStat>,
}

/// Arithmetic means across ALL top-level groups for the week
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeekAverages {
    /// Mean `total_load` per group
    pub avg_group_load: f64,
    /// Mean `total_sets` per group
    pub avg_group_sets: f64,
}

/// Neglected-muscle warning surfaced to the user
#[derive(Debug, Clone, Serialize)]
pub struct NeglectedWarning {
    /// Affected muscle group
    pub group_id: i64,
    /// Group name
    pub group_name: String,
    /// Whether the client may offer a dismiss action
    pub can_dismiss: bool,
    /// Display message
    pub message: String,
}

/// Complete weekly analytics payload (`data` field of the response)
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    /// Week window start (inclusive)
    pub week_start: String,
    /// Week window end (inclusive)
    pub week_end: String,
    /// Per-sub-muscle aggregates, all muscles present
    pub muscles: Vec<MuscleStat>,
    /// Per-group aggregates, all groups present
    pub groups: Vec<GroupStat>,
    /// Week averages over all groups
    pub averages: WeekAverages,
    /// Natural-language summary
    pub summary: String,
    /// Names of groups classified as focused
    pub focused_groups: Vec<String>,
    /// Names of groups classified as neglected
    pub neglected_groups: Vec<String>,
    /// Non-suppressed neglect warnings
    pub warnings: Vec<NeglectedWarning>,
    /// Focus mode the classification ran under
    pub training_focus: TrainingFocus,
    /// Group IDs that were eligible for classification
    pub tracked_muscle_groups: Vec<i64>,
}

/// Diagnostic counts appended when the request carries `debug=1`
#[derive(Debug, Clone, Serialize)]
pub struct DebugCounts {
    /// Number of group aggregates returned
    pub group_count: usize,
    /// Number of muscle aggregates returned
    pub muscle_count: usize,
    /// Group IDs in response order
    pub group_ids: Vec<i64>,
    /// Sub-muscle count per group id
    pub muscles_by_group: BTreeMap<i64, i64>,
}

/// Success envelope wrapping a data payload
#[derive(Debug, Serialize)]
pub struct ApiData<T> {
    /// Always `true`
    pub success: bool,
    /// Payload
    pub data: T,
    /// Diagnostic counts (weekly analytics with `debug=1` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugCounts>,
}

impl<T> ApiData<T> {
    /// Wrap a payload in the success envelope
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            debug: None,
        }
    }

    /// Attach diagnostic counts
    #[must_use]
    pub fn with_debug(mut self, debug: DebugCounts) -> Self {
        self.debug = Some(debug);
        self
    }
}

/// Success envelope carrying only a confirmation message
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    /// Always `true`
    pub success: bool,
    /// Confirmation text
    pub message: String,
}

impl ApiMessage {
    /// Build a confirmation envelope
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
