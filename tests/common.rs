// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, delay-free profiles, mock-backed builders, and seed fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `nutrition_catalog`

use nutrition_catalog::cache::ResponseCache;
use nutrition_catalog::catalog::CatalogBuilder;
use nutrition_catalog::config::LookupProfile;
use nutrition_catalog::external::{LookupClient, MockUsdaClient};
use nutrition_catalog::models::{FoodRecord, Seed};
use serde_json::Value;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Thorough profile with no retries and no pacing
pub const fn thorough_profile() -> LookupProfile {
    LookupProfile::thorough().without_delays()
}

/// Quick profile with no retries and no pacing
pub const fn quick_profile() -> LookupProfile {
    LookupProfile::quick().without_delays()
}

/// Builder over a mock source with an empty cache
pub fn mock_builder(mock: MockUsdaClient, profile: LookupProfile) -> CatalogBuilder<MockUsdaClient> {
    init_test_logging();
    CatalogBuilder::new(LookupClient::new(mock, ResponseCache::new()), profile)
}

/// Parse a single-group seed document
pub fn seed(value: Value) -> Seed {
    serde_json::from_value(value).expect("valid seed fixture")
}

/// Parse seed text, keeping group order as written
pub fn seed_from_str(text: &str) -> Seed {
    serde_json::from_str(text).expect("valid seed fixture")
}

/// Search-shaped record: flat nutrient entries and a relevance score
pub fn search_record(fdc_id: u64, description: &str, kcal: f64, protein: f64, score: f64) -> FoodRecord {
    serde_json::from_value(serde_json::json!({
        "fdcId": fdc_id,
        "description": description,
        "score": score,
        "foodNutrients": [
            {"nutrientId": 1008, "nutrientNumber": "208", "nutrientName": "Energy", "unitName": "KCAL", "value": kcal},
            {"nutrientId": 1003, "nutrientNumber": "203", "nutrientName": "Protein", "unitName": "G", "value": protein}
        ]
    }))
    .expect("valid search record fixture")
}
