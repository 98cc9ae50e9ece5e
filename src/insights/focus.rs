// ABOUTME: Focus-scope resolution mapping training focus to tracked muscle groups
// ABOUTME: Lenient case-insensitive name matching tolerates taxonomy drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

use crate::models::{GroupStat, TrainingFocus};
use std::collections::HashMap;
use tracing::warn;

/// Group names tracked under an upper-body focus. Both `shoulder` and
/// `shoulders` are listed because deployments differ on the singular.
const UPPER_BODY_GROUPS: &[&str] = &["chest", "back", "shoulder", "shoulders", "arms", "core"];

/// Group names tracked under a lower-body focus
const LOWER_BODY_GROUPS: &[&str] = &["legs", "glutes", "calves"];

/// Resolve which group IDs are eligible for insight classification
///
/// Name matching is case-insensitive and lenient: names absent from the
/// taxonomy are skipped. A `custom` focus with no saved selection falls
/// back to tracking everything, same as `full_body`.
#[must_use]
pub fn tracked_group_ids(
    focus: TrainingFocus,
    custom_groups: Option<&[i64]>,
    groups: &[GroupStat],
) -> Vec<i64> {
    let all_ids = || groups.iter().map(|g| g.group_id).collect::<Vec<_>>();

    match focus {
        TrainingFocus::FullBody => all_ids(),
        TrainingFocus::UpperBody => ids_by_name(UPPER_BODY_GROUPS, groups, focus),
        TrainingFocus::LowerBody => ids_by_name(LOWER_BODY_GROUPS, groups, focus),
        TrainingFocus::Custom => match custom_groups {
            Some(ids) if !ids.is_empty() => ids.to_vec(),
            _ => all_ids(),
        },
    }
}

fn ids_by_name(names: &[&str], groups: &[GroupStat], focus: TrainingFocus) -> Vec<i64> {
    let by_name: HashMap<String, i64> = groups
        .iter()
        .map(|g| (g.group_name.to_lowercase(), g.group_id))
        .collect();

    let ids: Vec<i64> = names
        .iter()
        .filter_map(|name| by_name.get(*name).copied())
        .collect();

    if ids.is_empty() {
        warn!(focus = %focus, "No muscle groups matched the focus name list");
    }

    ids
}
