// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates build modes, lookup profiles, environment loading, and credential checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutrition_catalog::config::{
    BuildMode, CatalogConfig, LookupProfile, RetryConfig, SearchBreadth,
};
use nutrition_catalog::constants::{datasets, env_vars, fdc};
use nutrition_catalog::errors::ErrorCode;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const ALL_VARS: [&str; 6] = [
    env_vars::API_KEY,
    env_vars::BASE_URL,
    env_vars::SEED_PATH,
    env_vars::CATALOG_PATH,
    env_vars::CACHE_PATH,
    env_vars::QUICK,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_quick_profile_values() {
    let profile = LookupProfile::quick();
    assert_eq!(profile.retry.max_attempts, 3);
    assert_eq!(profile.retry.initial_backoff, Duration::from_millis(500));
    assert_eq!(profile.timeouts.connect, Duration::from_secs(5));
    assert_eq!(profile.timeouts.request, Duration::from_secs(15));
    assert_eq!(profile.pacing.min, Duration::from_millis(60));
    assert_eq!(profile.pacing.span, Duration::from_millis(40));
    assert_eq!(profile.page_size, 12);
    assert_eq!(profile.breadth, SearchBreadth::Fixed(&datasets::QUICK));
}

#[test]
fn test_thorough_profile_values() {
    let profile = LookupProfile::thorough();
    assert_eq!(profile.retry.max_attempts, 5);
    assert_eq!(profile.retry.initial_backoff, Duration::from_millis(750));
    assert_eq!(profile.timeouts.connect, Duration::from_secs(10));
    assert_eq!(profile.timeouts.request, Duration::from_secs(60));
    assert_eq!(profile.pacing.min, Duration::from_millis(180));
    assert_eq!(profile.pacing.span, Duration::from_millis(100));
    assert_eq!(profile.page_size, 30);
    assert_eq!(profile.breadth, SearchBreadth::GroupPreference);
}

#[test]
fn test_without_delays_keeps_search_settings() {
    let profile = LookupProfile::quick().without_delays();
    assert_eq!(profile.retry, RetryConfig::disabled());
    assert!(profile.pacing.min.is_zero());
    assert_eq!(profile.page_size, 12);
}

#[test]
fn test_backoff_schedule() {
    let retry = LookupProfile::quick().retry;
    assert_eq!(retry.backoff_for_retry(1), Duration::from_millis(500));
    assert_eq!(retry.backoff_for_retry(2), Duration::from_millis(800));
}

#[test]
fn test_mode_display() {
    assert_eq!(BuildMode::Quick.to_string(), "QUICK");
    assert_eq!(BuildMode::Thorough.to_string(), "NORMAL");
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = CatalogConfig::from_env();
    assert_eq!(config.api_key, fdc::DEMO_API_KEY);
    assert_eq!(config.base_url, fdc::DEFAULT_BASE_URL);
    assert_eq!(config.seed_path, PathBuf::from("catalog.seed.json"));
    assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
    assert_eq!(config.cache_path, PathBuf::from("usda_cache.json"));
    assert_eq!(config.mode, BuildMode::Thorough);
    assert!(!config.force);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(env_vars::API_KEY, "abc123");
    env::set_var(env_vars::SEED_PATH, "/tmp/seed.json");
    env::set_var(env_vars::CACHE_PATH, "/tmp/cache.json");
    env::set_var(env_vars::QUICK, "1");

    let config = CatalogConfig::from_env();
    assert_eq!(config.api_key, "abc123");
    assert_eq!(config.seed_path, PathBuf::from("/tmp/seed.json"));
    assert_eq!(config.cache_path, PathBuf::from("/tmp/cache.json"));
    assert!(config.mode.is_quick());
    assert_eq!(config.profile(), LookupProfile::quick());

    clear_env();
}

#[test]
#[serial]
fn test_quick_requires_exact_one() {
    clear_env();
    env::set_var(env_vars::QUICK, "true");
    assert_eq!(BuildMode::from_env(), BuildMode::Thorough);
    clear_env();
}

#[test]
fn test_missing_credential_is_rejected() {
    for key in ["", "   ", fdc::PLACEHOLDER_API_KEY] {
        let config = CatalogConfig {
            api_key: key.to_owned(),
            ..CatalogConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().code, ErrorCode::ConfigMissing);
    }
}

#[test]
fn test_non_http_base_url_is_rejected() {
    let config = CatalogConfig {
        base_url: "ftp://example.org".to_owned(),
        ..CatalogConfig::default()
    };
    assert_eq!(config.validate().unwrap_err().code, ErrorCode::ConfigInvalid);
}
