// ABOUTME: Cache-first lookup client over a FoodDataSource
// ABOUTME: By-id fetches propagate failures; multi-dataset searches swallow per-dataset failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::usda_client::FoodDataSource;
use crate::cache::ResponseCache;
use crate::errors::AppResult;
use crate::models::FoodRecord;
use tracing::{debug, warn};

/// Lookup client: consults the [`ResponseCache`] before the source and
/// records every new response in it
pub struct LookupClient<S> {
    source: S,
    cache: ResponseCache,
}

impl<S: FoodDataSource> LookupClient<S> {
    /// Combine a source with a loaded cache
    pub const fn new(source: S, cache: ResponseCache) -> Self {
        Self { source, cache }
    }

    /// Full record for an id, from cache or source
    ///
    /// # Errors
    ///
    /// Returns the source error once its retries are exhausted
    pub async fn fetch_by_id(&mut self, fdc_id: &str) -> AppResult<FoodRecord> {
        if let Some(record) = self.cache.get_by_id(fdc_id) {
            debug!(fdc_id, "Food record served from cache");
            return Ok(record.clone());
        }
        let record = self.source.fetch_food(fdc_id).await?;
        self.cache.put_by_id(fdc_id, record.clone());
        Ok(record)
    }

    /// Candidates for `query` across `datasets`, concatenated in dataset order
    ///
    /// A dataset whose query fails contributes no candidates.
    pub async fn search_by_name(
        &mut self,
        query: &str,
        datasets: &[&str],
        page_size: u32,
    ) -> Vec<FoodRecord> {
        if let Some(records) = self.cache.get_search(query, datasets, page_size) {
            debug!(query, count = records.len(), "Search served from cache");
            return records.to_vec();
        }

        let mut candidates = Vec::new();
        for data_type in datasets {
            match self.source.search_foods(query, data_type, page_size).await {
                Ok(records) => candidates.extend(records),
                Err(error) => {
                    warn!(query, data_type, error = %error, "Dataset search failed, skipping");
                }
            }
        }

        self.cache
            .put_search(query, datasets, page_size, candidates.clone());
        candidates
    }

    /// The cache, including entries added during this run
    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// The underlying source
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Release the cache for persisting
    pub fn into_cache(self) -> ResponseCache {
        self.cache
    }
}
