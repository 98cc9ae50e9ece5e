// ABOUTME: Insight classification of muscle groups against weekly averages
// ABOUTME: Focused/neglected thresholds plus Smart Silence warning suppression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

use crate::models::{DismissalState, GroupStat, NeglectedWarning, WeekAverages};
use std::collections::HashMap;

/// A group is focused at or above this multiple of the week average
const FOCUSED_RATIO: f64 = 1.5;

/// A group is neglected at or below this multiple of the week average
const NEGLECTED_RATIO: f64 = 0.5;

/// Warning category for under-trained groups
pub const WARNING_NEGLECTED: &str = "neglected";

/// A group classified as neglected, before warning suppression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeglectedGroup {
    /// Group id
    pub group_id: i64,
    /// Group name
    pub group_name: String,
}

/// Classification outcome for one week
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Names of focused groups, in group order
    pub focused: Vec<String>,
    /// Neglected groups, in group order
    pub neglected: Vec<NeglectedGroup>,
}

/// Arithmetic means of load and sets across ALL top-level groups,
/// including untrained ones
#[must_use]
pub fn week_averages(groups: &[GroupStat]) -> WeekAverages {
    if groups.is_empty() {
        return WeekAverages {
            avg_group_load: 0.0,
            avg_group_sets: 0.0,
        };
    }

    let count = groups.len() as f64;
    let total_load: f64 = groups.iter().map(|g| g.total_load).sum();
    let total_sets: i64 = groups.iter().map(|g| g.total_sets).sum();

    WeekAverages {
        avg_group_load: total_load / count,
        avg_group_sets: total_sets as f64 / count,
    }
}

/// Classify each tracked group as focused or neglected relative to the
/// week averages; untracked groups are skipped entirely
///
/// Thresholds only fire against a positive average, so an all-zero week
/// classifies nothing. Focused wins when both conditions hold, which
/// also guarantees a group is never in both lists.
#[must_use]
pub fn classify_groups(
    groups: &[GroupStat],
    tracked: &[i64],
    averages: WeekAverages,
) -> Classification {
    let mut classification = Classification::default();
    let WeekAverages {
        avg_group_load: avg_load,
        avg_group_sets: avg_sets,
    } = averages;

    for group in groups {
        if !tracked.contains(&group.group_id) {
            continue;
        }

        let load = group.total_load;
        let sets = group.total_sets as f64;

        if (avg_load > 0.0 && load >= FOCUSED_RATIO * avg_load)
            || (avg_sets > 0.0 && sets >= FOCUSED_RATIO * avg_sets)
        {
            classification.focused.push(group.group_name.clone());
        } else if (avg_load > 0.0 && load <= NEGLECTED_RATIO * avg_load)
            && (avg_sets > 0.0 && sets <= NEGLECTED_RATIO * avg_sets)
        {
            classification.neglected.push(NeglectedGroup {
                group_id: group.group_id,
                group_name: group.group_name.clone(),
            });
        }
    }

    classification
}

/// Smart Silence: decide whether a warning may be shown
///
/// Any recorded dismissal hides the warning, permanent or not. A
/// non-permanent dismissal can resurface only by being reset; the
/// warning does not reappear on its own in later weeks.
#[must_use]
pub fn should_show_warning(key: &str, dismissed: &HashMap<String, DismissalState>) -> bool {
    !dismissed.contains_key(key)
}

/// Build the warning list for neglected groups, applying Smart Silence
#[must_use]
pub fn neglect_warnings(
    neglected: &[NeglectedGroup],
    dismissed: &HashMap<String, DismissalState>,
) -> Vec<NeglectedWarning> {
    neglected
        .iter()
        .filter(|group| {
            let key = format!("{}_{WARNING_NEGLECTED}", group.group_id);
            should_show_warning(&key, dismissed)
        })
        .map(|group| NeglectedWarning {
            group_id: group.group_id,
            group_name: group.group_name.clone(),
            can_dismiss: true,
            message: format!("You haven't trained {} much this week.", group.group_name),
        })
        .collect()
}
