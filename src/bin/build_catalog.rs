// ABOUTME: Command-line entry point that builds the nutrition catalog from FoodData Central
// ABOUTME: Loads seed, prior catalog and cache, resolves every ingredient, writes outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition catalog builder.
//!
//! Usage:
//! ```bash
//! # Thorough build (FDC_API_KEY from environment, DEMO_KEY otherwise)
//! cargo run --bin build-catalog
//!
//! # Quick build: fewer retries, smaller searches, shorter pauses
//! cargo run --bin build-catalog -- --quick
//!
//! # Refresh every entry instead of reusing plausible ones
//! cargo run --bin build-catalog -- --force
//!
//! # Custom file locations
//! cargo run --bin build-catalog -- --seed data/seed.json --out data/catalog.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use nutrition_catalog::cache::ResponseCache;
use nutrition_catalog::catalog::{
    load_seed, write_catalog, BuildSummary, CatalogBuilder, ExistingCatalog,
};
use nutrition_catalog::config::{BuildMode, CatalogConfig};
use nutrition_catalog::external::{LookupClient, UsdaClient, UsdaClientConfig};
use nutrition_catalog::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "build-catalog",
    about = "Nutrition Catalog Builder",
    long_about = "Resolve seed ingredients against USDA FoodData Central and write per-100g kcal/protein values"
)]
struct BuildArgs {
    /// Quick mode: 3 datasets, 12 results each, shorter timeouts (same as QUICK=1)
    #[arg(long)]
    quick: bool,

    /// Re-resolve every item even if the prior catalog has plausible values
    #[arg(long)]
    force: bool,

    /// Seed list path
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Catalog output path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Response cache path
    #[arg(long)]
    cache: Option<PathBuf>,

    /// `FoodData` Central API key override
    #[arg(long)]
    api_key: Option<String>,

    /// API base URL override
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl BuildArgs {
    /// Environment configuration with command-line overrides applied
    fn into_config(self) -> CatalogConfig {
        let mut config = CatalogConfig::from_env();
        if self.quick {
            config.mode = BuildMode::Quick;
        }
        config.force = self.force;
        if let Some(seed) = self.seed {
            config.seed_path = seed;
        }
        if let Some(out) = self.out {
            config.catalog_path = out;
        }
        if let Some(cache) = self.cache {
            config.cache_path = cache;
        }
        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = BuildArgs::parse();
    LoggingConfig::from_env().verbose(args.verbose).init()?;

    let config = args.into_config();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    info!(mode = %config.mode, force = config.force, "Running catalog builder");

    let seed = load_seed(&config.seed_path)
        .with_context(|| format!("Failed to read seed {}", config.seed_path.display()))?;
    let existing = if config.force {
        ExistingCatalog::empty()
    } else {
        ExistingCatalog::load(&config.catalog_path)
    };
    let cache = ResponseCache::load(&config.cache_path);

    let client = UsdaClient::new(UsdaClientConfig::from_catalog_config(&config))?;
    let mut builder = CatalogBuilder::new(LookupClient::new(client, cache), config.profile())
        .with_force(config.force);
    let report = builder.build(&seed, &existing).await;

    write_catalog(&config.catalog_path, &report.catalog).with_context(|| {
        format!("Failed to write catalog {}", config.catalog_path.display())
    })?;
    builder
        .into_lookup()
        .into_cache()
        .save(&config.cache_path)
        .with_context(|| format!("Failed to write cache {}", config.cache_path.display()))?;

    log_summary(&config, &report.summary);
    Ok(())
}

fn log_summary(config: &CatalogConfig, summary: &BuildSummary) {
    info!(
        mode = %config.mode,
        total = summary.total(),
        ok = summary.ok,
        fallback = summary.fallback,
        warnings = summary.warnings,
        skipped = summary.skipped,
        pinned = summary.pinned,
        catalog = %config.catalog_path.display(),
        cache = %config.cache_path.display(),
        "Catalog build complete"
    );
}
