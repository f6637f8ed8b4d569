// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Provides the raw source trait, HTTP client with retries, and cache-first lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients

/// Cache-first lookup client
pub mod lookup;
/// Retry with exponential backoff and jitter
pub mod retry;
/// USDA `FoodData` Central client
pub mod usda_client;

pub use lookup::LookupClient;
pub use usda_client::{FoodDataSource, MockUsdaClient, UsdaClient, UsdaClientConfig};
