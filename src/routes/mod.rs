// ABOUTME: HTTP route handlers for the analytics and preference API
// ABOUTME: Thin axum handlers that validate input and delegate to database/insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

//! HTTP route handlers
//!
//! Handlers stay thin: parse and validate the request, call into
//! [`crate::database`] and [`crate::insights`], and wrap the result in
//! the response envelope. Failures serialize as HTTP 200 with
//! `success: false` because the mobile client treats transport-level
//! errors as connectivity problems, not application errors.

/// Weekly analytics endpoint
pub mod analytics;
/// Health and readiness endpoints
pub mod health;
/// Training preference and warning dismissal endpoints
pub mod preferences;

pub use analytics::AnalyticsRoutes;
pub use health::HealthRoutes;
pub use preferences::PreferenceRoutes;
