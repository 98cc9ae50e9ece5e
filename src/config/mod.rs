// ABOUTME: Configuration module organization for the analytics service
// ABOUTME: Environment-only configuration, no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

//! Configuration management
//!
//! All configuration is read from environment variables at startup;
//! there are no configuration files to deploy or drift.

/// Environment-driven server configuration
pub mod environment;

pub use environment::{DatabaseConfig, ServerConfig};
