// ABOUTME: File-backed response cache for FoodData Central lookups
// ABOUTME: Maps food ids and composite search keys to raw records, persisted across runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Response cache
//!
//! The whole cache is loaded into memory at startup and rewritten at the end of
//! a run. Entries never expire and are never invalidated; the file only grows.
//! A missing or unreadable cache file yields an empty cache.

use crate::errors::AppResult;
use crate::models::FoodRecord;
use crate::utils::json_file::{self, LoadOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk cache document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheDocument {
    /// Full records keyed by `FoodData` Central id
    #[serde(default)]
    pub food_by_id: BTreeMap<String, FoodRecord>,
    /// Concatenated search results keyed by [`search_key`]
    #[serde(default)]
    pub search: BTreeMap<String, Vec<FoodRecord>>,
}

/// Composite cache key for a search: normalized query, dataset list, page size
#[must_use]
pub fn search_key(query: &str, datasets: &[&str], page_size: u32) -> String {
    let normalized = query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    format!("{normalized}||{}||{page_size}", datasets.join("|"))
}

/// In-memory response cache with explicit load/save lifecycle
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    document: CacheDocument,
    dirty: bool,
}

impl ResponseCache {
    /// Empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed document
    #[must_use]
    pub const fn from_document(document: CacheDocument) -> Self {
        Self {
            document,
            dirty: false,
        }
    }

    /// Load the cache file; absent and corrupt files produce an empty cache
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let outcome: LoadOutcome<CacheDocument> =
            json_file::load_json(path).logged("response cache", path);
        Self::from_document(outcome.unwrap_or_default())
    }

    /// Rewrite the cache file with the full in-memory contents
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> AppResult<()> {
        json_file::write_json_pretty(path, &self.document)
    }

    /// Cached full record for an id
    #[must_use]
    pub fn get_by_id(&self, fdc_id: &str) -> Option<&FoodRecord> {
        self.document.food_by_id.get(fdc_id)
    }

    /// Store a full record
    pub fn put_by_id(&mut self, fdc_id: impl Into<String>, record: FoodRecord) {
        self.document.food_by_id.insert(fdc_id.into(), record);
        self.dirty = true;
    }

    /// Cached concatenated search result
    #[must_use]
    pub fn get_search(&self, query: &str, datasets: &[&str], page_size: u32) -> Option<&[FoodRecord]> {
        self.document
            .search
            .get(&search_key(query, datasets, page_size))
            .map(Vec::as_slice)
    }

    /// Store a concatenated search result
    pub fn put_search(
        &mut self,
        query: &str,
        datasets: &[&str],
        page_size: u32,
        records: Vec<FoodRecord>,
    ) {
        self.document
            .search
            .insert(search_key(query, datasets, page_size), records);
        self.dirty = true;
    }

    /// Whether entries were added since load
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Entry counts: (records by id, search results)
    #[must_use]
    pub fn stats(&self) -> (usize, usize) {
        (self.document.food_by_id.len(), self.document.search.len())
    }
}
