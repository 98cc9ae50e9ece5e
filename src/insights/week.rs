// ABOUTME: Week window resolution for analytics requests
// ABOUTME: Defaults to the Monday of the current week, honors explicit week_start dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate, Utc};

/// Inclusive seven-day reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window (start + 6)
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Resolve the reporting window for a request
    ///
    /// Without a parameter the window starts on the Monday of the week
    /// containing `today`. An explicit `week_start` is used as given
    /// (clients send Mondays, but any start yields a 7-day window).
    ///
    /// # Errors
    ///
    /// Returns an error if `week_start` is not a `YYYY-MM-DD` date.
    pub fn resolve(week_start: Option<&str>, today: NaiveDate) -> AppResult<Self> {
        let start = match week_start {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                AppError::invalid_format(format!("Invalid week_start '{raw}': {e}"))
            })?,
            None => today - Duration::days(i64::from(today.weekday().num_days_from_monday())),
        };

        Ok(Self {
            start,
            end: start + Duration::days(6),
        })
    }

    /// Resolve against the current UTC date
    ///
    /// # Errors
    ///
    /// Returns an error if `week_start` is not a `YYYY-MM-DD` date.
    pub fn resolve_now(week_start: Option<&str>) -> AppResult<Self> {
        Self::resolve(week_start, Utc::now().date_naive())
    }
}
