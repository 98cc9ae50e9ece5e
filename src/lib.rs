// ABOUTME: Main library entry point for the RepWise analytics service
// ABOUTME: Exposes weekly muscle-group training analytics over a REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

#![deny(unsafe_code)]

//! # RepWise Analytics
//!
//! Server-side analytics for the RepWise gym-management mobile app. The
//! service computes, per user and per calendar week, a weighted training
//! load across a muscle taxonomy, classifies each top-level muscle group
//! as focused, neglected, or balanced relative to the week's averages,
//! and composes a human-readable summary. Neglected-muscle warnings
//! honor per-user dismissals ("Smart Silence").
//!
//! ## Architecture
//!
//! - **Database**: SQLite access layer with per-concern query modules
//! - **Insights**: pure aggregation, classification, and summary logic
//! - **Routes**: thin axum handlers delegating to the insights layer
//! - **Config**: environment-driven server configuration
//!
//! Every request is stateless: parameters in, a fixed sequence of
//! aggregation queries, in-memory classification, JSON out. There is no
//! caching and no background work.

/// Environment-driven configuration management
pub mod config;

/// SQLite database access layer
pub mod database;

/// Unified error handling with standard error codes and JSON envelopes
pub mod errors;

/// Weekly training-load aggregation, classification, and summaries
pub mod insights;

/// Production logging and structured output
pub mod logging;

/// Common data models for taxonomy, aggregates, and API payloads
pub mod models;

/// `HTTP` routes for analytics and training preferences
pub mod routes;

/// Server resources and router assembly
pub mod server;
