// ABOUTME: Integration tests for the file-backed response cache and lookup client
// ABOUTME: Validates persistence, lenient loading, key normalization, and cache-first lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use nutrition_catalog::cache::{search_key, ResponseCache};
use nutrition_catalog::constants::datasets::{BRANDED, FOUNDATION, SR_LEGACY};
use nutrition_catalog::external::{LookupClient, MockUsdaClient};
use nutrition_catalog::models::FoodRecord;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let cache = ResponseCache::load(&dir.path().join("absent.json"));
    assert_eq!(cache.stats(), (0, 0));
    assert!(!cache.is_dirty());
}

#[test]
fn test_corrupt_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.json");
    fs::write(&path, "{\"food_by_id\": {\"1\": ").unwrap();
    assert_eq!(ResponseCache::load(&path).stats(), (0, 0));
}

#[test]
fn test_null_description_does_not_discard_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.json");
    fs::write(
        &path,
        r#"{
            "food_by_id": {
                "171477": {"fdcId": 171477, "description": "Chicken", "foodNutrients": []},
                "999": {"fdcId": 999, "description": null, "foodNutrients": null}
            },
            "search": {
                "chicken||Foundation||30": [{"fdcId": 999, "description": null}]
            }
        }"#,
    )
    .unwrap();

    let cache = ResponseCache::load(&path);
    assert_eq!(cache.stats(), (2, 1));
    assert_eq!(cache.get_by_id("999").unwrap().description, "");
    assert_eq!(cache.get_by_id("171477").unwrap().description, "Chicken");
}

#[test]
fn test_save_and_reload() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("cache.json");

    let mut cache = ResponseCache::new();
    cache.put_by_id("171477", FoodRecord::new("171477", "Chicken").with_macros(165.0, 31.0));
    cache.put_search(
        "chicken breast cooked",
        &[FOUNDATION, SR_LEGACY],
        30,
        vec![FoodRecord::new("171477", "Chicken")],
    );
    assert!(cache.is_dirty());
    cache.save(&path)?;

    let reloaded = ResponseCache::load(&path);
    assert_eq!(reloaded.stats(), (1, 1));
    assert_eq!(
        reloaded.get_by_id("171477").unwrap().description,
        "Chicken"
    );
    assert_eq!(
        reloaded
            .get_search("chicken breast cooked", &[FOUNDATION, SR_LEGACY], 30)
            .unwrap()
            .len(),
        1
    );

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert!(raw["food_by_id"].is_object());
    assert!(raw["search"].is_object());
    Ok(())
}

#[test]
fn test_search_key_normalizes_query_only() {
    assert_eq!(
        search_key("  Chicken   Breast ", &[FOUNDATION], 12),
        search_key("chicken breast", &[FOUNDATION], 12)
    );
    assert_ne!(
        search_key("chicken breast", &[FOUNDATION, BRANDED], 12),
        search_key("chicken breast", &[BRANDED, FOUNDATION], 12)
    );
    assert_ne!(
        search_key("chicken breast", &[FOUNDATION], 12),
        search_key("chicken breast", &[FOUNDATION], 30)
    );
}

#[tokio::test]
async fn test_lookup_fetch_is_cache_first() -> Result<()> {
    common::init_test_logging();
    let mut lookup = LookupClient::new(MockUsdaClient::with_sample_foods(), ResponseCache::new());

    let first = lookup.fetch_by_id("171477").await?;
    let second = lookup.fetch_by_id("171477").await?;
    assert_eq!(first, second);
    assert_eq!(lookup.source().fetch_calls(), 1);
    assert!(lookup.cache().get_by_id("171477").is_some());
    Ok(())
}

#[tokio::test]
async fn test_lookup_fetch_failure_propagates_and_is_not_cached() {
    common::init_test_logging();
    let mut lookup = LookupClient::new(MockUsdaClient::new(), ResponseCache::new());
    assert!(lookup.fetch_by_id("404404").await.is_err());
    assert!(lookup.cache().get_by_id("404404").is_none());
}

#[tokio::test]
async fn test_search_concatenates_in_dataset_order() {
    common::init_test_logging();
    let mock = MockUsdaClient::new()
        .with_search_results("salmon cooked", BRANDED, vec![FoodRecord::new("3", "Branded salmon")])
        .with_search_results(
            "salmon cooked",
            FOUNDATION,
            vec![FoodRecord::new("1", "Salmon A"), FoodRecord::new("2", "Salmon B")],
        );
    let mut lookup = LookupClient::new(mock, ResponseCache::new());

    let results = lookup
        .search_by_name("salmon cooked", &[FOUNDATION, SR_LEGACY, BRANDED], 30)
        .await;
    let ids: Vec<_> = results.iter().filter_map(FoodRecord::fdc_id_string).collect();
    assert_eq!(ids, ["1", "2", "3"]);

    let again = lookup
        .search_by_name("salmon cooked", &[FOUNDATION, SR_LEGACY, BRANDED], 30)
        .await;
    assert_eq!(again.len(), 3);
    assert_eq!(lookup.source().search_calls(), 3);
}

#[tokio::test]
async fn test_failed_dataset_contributes_nothing() {
    common::init_test_logging();
    let mock = MockUsdaClient::new()
        .with_failing_dataset(FOUNDATION)
        .with_search_results("cod cooked", SR_LEGACY, vec![FoodRecord::new("7", "Cod, cooked")]);
    let mut lookup = LookupClient::new(mock, ResponseCache::new());

    let results = lookup
        .search_by_name("cod cooked", &[FOUNDATION, SR_LEGACY], 30)
        .await;
    assert_eq!(results.len(), 1);
    assert_eq!(lookup.source().search_calls(), 2);
}
