// ABOUTME: Library entry point for the FoodData Central nutrition catalog builder
// ABOUTME: Resolves seed ingredients to per-100g kcal and protein values with caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Catalog
//!
//! Builds a local ingredient catalog from USDA `FoodData` Central. Each seed
//! ingredient is matched to a food record, normalized to kcal and protein per
//! 100 g, checked against realistic ranges for its food group, and written to
//! a catalog file alongside a persistent response cache.
//!
//! ## Architecture
//!
//! - **External**: `FoodData` Central client with retries, plus a cache-first lookup layer
//! - **Cache**: file-backed store of raw by-id and search responses
//! - **Nutrition**: extraction, plausibility gate, candidate selection, corrections
//! - **Catalog**: sequential builder and file persistence
//! - **Config**: quick/thorough profiles, environment settings, override tables
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrition_catalog::cache::ResponseCache;
//! use nutrition_catalog::catalog::{load_seed, CatalogBuilder, ExistingCatalog};
//! use nutrition_catalog::config::CatalogConfig;
//! use nutrition_catalog::errors::AppResult;
//! use nutrition_catalog::external::{LookupClient, UsdaClient, UsdaClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = CatalogConfig::from_env();
//!     config.validate()?;
//!
//!     let client = UsdaClient::new(UsdaClientConfig::from_catalog_config(&config))?;
//!     let lookup = LookupClient::new(client, ResponseCache::load(&config.cache_path));
//!     let mut builder = CatalogBuilder::new(lookup, config.profile());
//!
//!     let seed = load_seed(&config.seed_path)?;
//!     let report = builder
//!         .build(&seed, &ExistingCatalog::load(&config.catalog_path))
//!         .await;
//!     println!("Resolved {} ingredients", report.summary.total());
//!     Ok(())
//! }
//! ```

/// Persistent response cache
pub mod cache;

/// Catalog builder and persistence
pub mod catalog;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// External API clients
pub mod external;

/// Logging configuration
pub mod logging;

/// Seed, food record, and catalog data types
pub mod models;

/// Nutrient extraction, plausibility, selection, and corrections
pub mod nutrition;

/// Shared helpers
pub mod utils;
