// ABOUTME: USDA FoodData Central API client for food detail and dataset-restricted search
// ABOUTME: Implements request retries, timeouts, error classification, and a mock source for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central API Client
//!
//! Two read operations are used by the catalog builder:
//! - `GET {base}/food/{fdcId}`: full record for one food
//! - `GET {base}/foods/search?query=..&dataType=..&pageSize=..`: candidates
//!   restricted to a single dataset
//!
//! Both go through [`with_retry`], which repeats timeouts, connect failures,
//! 429 and 5xx responses with exponential backoff and jitter.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>
//!
//! # Example
//! ```rust,no_run
//! use nutrition_catalog::config::LookupProfile;
//! use nutrition_catalog::external::{FoodDataSource, UsdaClient, UsdaClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let profile = LookupProfile::thorough();
//! let config = UsdaClientConfig {
//!     api_key: "your_api_key".to_owned(),
//!     base_url: "https://api.nal.usda.gov/fdc/v1".to_owned(),
//!     retry: profile.retry,
//!     timeouts: profile.timeouts,
//! };
//!
//! let client = UsdaClient::new(config)?;
//! let candidates = client.search_foods("chicken breast cooked", "SR Legacy", 30).await?;
//! # Ok(())
//! # }
//! ```

use super::retry::{is_retryable_status, with_retry};
use crate::config::{CatalogConfig, RetryConfig, TimeoutConfig};
use crate::constants::fdc;
use crate::errors::{AppError, AppResult};
use crate::models::FoodRecord;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Raw transport to a food-composition database
#[async_trait]
pub trait FoodDataSource: Send + Sync {
    /// Full record for one food id
    async fn fetch_food(&self, fdc_id: &str) -> AppResult<FoodRecord>;

    /// Search results for `query` restricted to one dataset
    async fn search_foods(
        &self,
        query: &str,
        data_type: &str,
        page_size: u32,
    ) -> AppResult<Vec<FoodRecord>>;
}

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Retry policy per request
    pub retry: RetryConfig,
    /// Connect and request timeouts
    pub timeouts: TimeoutConfig,
}

impl UsdaClientConfig {
    /// Client settings for a catalog build
    #[must_use]
    pub fn from_catalog_config(config: &CatalogConfig) -> Self {
        let profile = config.profile();
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            retry: profile.retry,
            timeouts: profile.timeouts,
        }
    }
}

/// USDA API search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Option<Vec<FoodRecord>>,
}

/// USDA `FoodData` Central API Client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a new USDA API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: UsdaClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.timeouts.connect)
            .timeout(config.timeouts.request)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// GET `url` with the API key and `params`, retrying transient failures
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        with_retry(&self.config.retry, url, || self.get_json_once(url, params)).await
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &body).with_resource_id(url.to_owned()));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::external_service(fdc::SERVICE_NAME, format!("JSON parse error: {e}")))
    }
}

/// Map a transport-level failure to a retryable or permanent error
fn classify_transport_error(error: &reqwest::Error) -> AppError {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        AppError::external_unavailable(fdc::SERVICE_NAME, error.to_string())
    } else {
        AppError::external_service(fdc::SERVICE_NAME, error.to_string())
    }
}

/// Map a non-2xx status to an error code
fn classify_status(status: u16, body: &str) -> AppError {
    match status {
        429 => AppError::external_rate_limited(fdc::SERVICE_NAME),
        401 | 403 => AppError::external_auth_failed(fdc::SERVICE_NAME),
        404 => AppError::not_found("Food"),
        s if is_retryable_status(s) => {
            AppError::external_unavailable(fdc::SERVICE_NAME, format!("HTTP {s}: {body}"))
        }
        s => AppError::external_service(fdc::SERVICE_NAME, format!("HTTP {s}: {body}")),
    }
}

#[async_trait]
impl FoodDataSource for UsdaClient {
    async fn fetch_food(&self, fdc_id: &str) -> AppResult<FoodRecord> {
        if fdc_id.trim().is_empty() {
            return Err(AppError::invalid_input("FDC id cannot be empty"));
        }
        let url = format!("{}/food/{}", self.config.base_url, fdc_id.trim());
        debug!(fdc_id, "Fetching food record");
        self.get_json(&url, &[]).await
    }

    async fn search_foods(
        &self,
        query: &str,
        data_type: &str,
        page_size: u32,
    ) -> AppResult<Vec<FoodRecord>> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }
        if page_size == 0 || page_size > 200 {
            return Err(AppError::invalid_input(
                "Page size must be between 1 and 200",
            ));
        }

        let url = format!("{}/foods/search", self.config.base_url);
        debug!(query, data_type, page_size, "Searching foods");
        let response: SearchResponse = self
            .get_json(
                &url,
                &[
                    ("query", query.to_owned()),
                    ("dataType", data_type.to_owned()),
                    ("pageSize", page_size.to_string()),
                ],
            )
            .await?;
        Ok(response.foods.unwrap_or_default())
    }
}

/// Mock USDA client for testing (no API calls)
///
/// Search results are registered per (query, dataset); unregistered pairs
/// return no candidates. Calls are counted so tests can assert that cached
/// or skipped items issued no lookups.
#[derive(Default)]
pub struct MockUsdaClient {
    foods: HashMap<String, FoodRecord>,
    search_results: HashMap<(String, String), Vec<FoodRecord>>,
    failing_datasets: HashSet<String>,
    failing_ids: HashSet<String>,
    fetch_calls: AtomicUsize,
    search_calls: AtomicUsize,
    queries: Mutex<Vec<(String, String)>>,
}

impl MockUsdaClient {
    /// Create an empty mock client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock client preloaded with a roasted chicken breast record (FDC ID 171477)
    #[must_use]
    pub fn with_sample_foods() -> Self {
        Self::new().with_food(
            FoodRecord::new("171477", "Chicken, breast, meat only, cooked, roasted")
                .with_macros(165.0, 31.02),
        )
    }

    /// Register a full record, keyed by its id
    #[must_use]
    pub fn with_food(mut self, record: FoodRecord) -> Self {
        let id = record.fdc_id_string().unwrap_or_default();
        self.foods.insert(id, record);
        self
    }

    /// Register the candidates returned for `query` in `data_type`
    #[must_use]
    pub fn with_search_results(
        mut self,
        query: &str,
        data_type: &str,
        records: Vec<FoodRecord>,
    ) -> Self {
        self.search_results
            .insert((query.to_lowercase(), data_type.to_owned()), records);
        self
    }

    /// Make every search against `data_type` fail with a 503
    #[must_use]
    pub fn with_failing_dataset(mut self, data_type: &str) -> Self {
        self.failing_datasets.insert(data_type.to_owned());
        self
    }

    /// Make fetching `fdc_id` fail with a 503
    #[must_use]
    pub fn with_failing_id(mut self, fdc_id: &str) -> Self {
        self.failing_ids.insert(fdc_id.to_owned());
        self
    }

    /// Number of `fetch_food` calls so far
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `search_foods` calls so far
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Every (query, dataset) searched, in call order
    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FoodDataSource for MockUsdaClient {
    async fn fetch_food(&self, fdc_id: &str) -> AppResult<FoodRecord> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_ids.contains(fdc_id) {
            return Err(AppError::external_unavailable(fdc::SERVICE_NAME, "HTTP 503"));
        }
        self.foods
            .get(fdc_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Food with FDC ID {fdc_id}")))
    }

    async fn search_foods(
        &self,
        query: &str,
        data_type: &str,
        _page_size: u32,
    ) -> AppResult<Vec<FoodRecord>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((query.to_owned(), data_type.to_owned()));
        }
        if self.failing_datasets.contains(data_type) {
            return Err(AppError::external_unavailable(fdc::SERVICE_NAME, "HTTP 503"));
        }
        Ok(self
            .search_results
            .get(&(query.to_lowercase(), data_type.to_owned()))
            .cloned()
            .unwrap_or_default())
    }
}
