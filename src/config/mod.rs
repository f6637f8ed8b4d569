// ABOUTME: Configuration module for catalog builds
// ABOUTME: Environment settings, lookup profiles, and per-ingredient override tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the catalog builder
//!
//! - **Environment**: credentials, file paths, and quick/thorough lookup profiles
//! - **Overrides**: curated search hints, safe fallbacks, and pinned values

/// Environment and lookup profile configuration
pub mod environment;
/// Per-ingredient override tables
pub mod overrides;

pub use environment::{
    BuildMode, CatalogConfig, LookupProfile, PacingConfig, RetryConfig, SearchBreadth,
    TimeoutConfig,
};
pub use overrides::OverrideTables;
