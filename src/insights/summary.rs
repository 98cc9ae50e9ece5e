// ABOUTME: Natural-language weekly summary composition
// ABOUTME: Joins focused/neglected group lists with a focus-mode annotation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

use crate::models::TrainingFocus;

/// Fallback summary when nothing was classified
const BALANCED_SUMMARY: &str = "Balanced effort across muscle groups this week.";

/// Compose the human-readable weekly summary
///
/// Under a full-body focus an under-trained group is a problem
/// ("neglected"); under a narrower focus it's expected, so the phrasing
/// softens to "lighter work".
#[must_use]
pub fn compose_summary(focused: &[String], neglected: &[String], focus: TrainingFocus) -> String {
    let mut parts = Vec::new();

    if !focused.is_empty() {
        parts.push(format!("You focused more on {}", focused.join(", ")));
    }

    if !neglected.is_empty() {
        let phrase = if focus == TrainingFocus::FullBody {
            "but neglected"
        } else {
            "with lighter work on"
        };
        parts.push(format!("{phrase} {}", neglected.join(", ")));
    }

    let mut summary = if parts.is_empty() {
        BALANCED_SUMMARY.to_owned()
    } else {
        format!("{}.", parts.join(" "))
    };

    if let Some(annotation) = focus_annotation(focus) {
        summary.push(' ');
        summary.push_str(annotation);
    }

    summary
}

/// Tracking annotation appended when the focus narrows classification
const fn focus_annotation(focus: TrainingFocus) -> Option<&'static str> {
    match focus {
        TrainingFocus::FullBody => None,
        TrainingFocus::UpperBody => Some("Tracking: Upper body focus"),
        TrainingFocus::LowerBody => Some("Tracking: Lower body focus"),
        TrainingFocus::Custom => Some("Tracking: Custom muscle selection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_fallback() {
        let summary = compose_summary(&[], &[], TrainingFocus::FullBody);
        assert_eq!(summary, BALANCED_SUMMARY);
    }

    #[test]
    fn test_full_body_phrasing() {
        let focused = vec!["Chest".to_owned(), "Arms".to_owned()];
        let neglected = vec!["Legs".to_owned()];
        let summary = compose_summary(&focused, &neglected, TrainingFocus::FullBody);
        assert_eq!(
            summary,
            "You focused more on Chest, Arms but neglected Legs."
        );
    }

    #[test]
    fn test_narrow_focus_phrasing_and_annotation() {
        let focused = vec!["Chest".to_owned()];
        let neglected = vec!["Back".to_owned()];
        let summary = compose_summary(&focused, &neglected, TrainingFocus::UpperBody);
        assert_eq!(
            summary,
            "You focused more on Chest with lighter work on Back. Tracking: Upper body focus"
        );
    }

    #[test]
    fn test_balanced_still_gets_annotation() {
        let summary = compose_summary(&[], &[], TrainingFocus::Custom);
        assert_eq!(
            summary,
            "Balanced effort across muscle groups this week. Tracking: Custom muscle selection"
        );
    }

    #[test]
    fn test_neglected_only() {
        let neglected = vec!["Glutes".to_owned()];
        let summary = compose_summary(&[], &neglected, TrainingFocus::FullBody);
        assert_eq!(summary, "but neglected Glutes.");
    }
}
