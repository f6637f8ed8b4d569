// ABOUTME: Environment configuration for catalog builds: credentials, paths, and lookup profiles
// ABOUTME: Quick and thorough profiles differ only in retry, timeout, pacing, and search breadth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Values come from environment variables first; the `build-catalog` binary
//! then applies command-line overrides and calls [`CatalogConfig::validate`]
//! before any work starts.

use crate::constants::{datasets, env_vars, fdc, paths};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Operating mode of a build
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Fewer retries, shorter timeouts and sleeps, narrower search
    Quick,
    /// Full retry budget and dataset preference ordering
    #[default]
    Thorough,
}

impl BuildMode {
    /// Quick mode when `QUICK=1`, thorough otherwise
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(env_vars::QUICK).as_deref() {
            Ok("1") => Self::Quick,
            _ => Self::Thorough,
        }
    }

    /// Lookup profile for this mode
    #[must_use]
    pub const fn profile(self) -> LookupProfile {
        match self {
            Self::Quick => LookupProfile::quick(),
            Self::Thorough => LookupProfile::thorough(),
        }
    }

    /// Check if this is quick mode
    #[must_use]
    pub const fn is_quick(self) -> bool {
        matches!(self, Self::Quick)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quick => write!(f, "QUICK"),
            Self::Thorough => write!(f, "NORMAL"),
        }
    }
}

/// Exponential backoff retry settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Total attempts including the first request
    pub max_attempts: u32,
    /// Sleep before the second attempt
    pub initial_backoff: Duration,
    /// Growth factor applied to the backoff after each failed attempt
    pub backoff_multiplier: f64,
    /// Upper bound of the uniform random jitter added to each sleep
    pub max_jitter: Duration,
}

impl RetryConfig {
    /// Backoff before retry number `retry` (1-based), without jitter
    #[must_use]
    pub fn backoff_for_retry(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry.saturating_sub(1).min(16)).unwrap_or(16);
        self.initial_backoff
            .mul_f64(self.backoff_multiplier.powi(exponent))
    }

    /// No retries and no sleeps
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
            max_jitter: Duration::ZERO,
        }
    }
}

/// HTTP timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// TCP/TLS connect timeout
    pub connect: Duration,
    /// Whole-request timeout
    pub request: Duration,
}

/// Randomized sleep between catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Fixed part of the sleep
    pub min: Duration,
    /// Upper bound of the random part
    pub span: Duration,
}

impl PacingConfig {
    /// No pacing
    pub const NONE: Self = Self {
        min: Duration::ZERO,
        span: Duration::ZERO,
    };
}

/// Which datasets a search is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBreadth {
    /// Always the same dataset list
    Fixed(&'static [&'static str]),
    /// Per-group dataset preference ordering
    GroupPreference,
}

/// Every knob that differs between quick and thorough builds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupProfile {
    /// Mode this profile belongs to
    pub mode: BuildMode,
    /// Retry policy for each HTTP request
    pub retry: RetryConfig,
    /// HTTP timeouts
    pub timeouts: TimeoutConfig,
    /// Sleep after each resolved catalog item
    pub pacing: PacingConfig,
    /// Results requested per dataset query
    pub page_size: u32,
    /// Dataset selection policy
    pub breadth: SearchBreadth,
}

impl LookupProfile {
    /// Quick profile: 3 attempts, short timeouts, 3 datasets of 12 results
    #[must_use]
    pub const fn quick() -> Self {
        Self {
            mode: BuildMode::Quick,
            retry: RetryConfig {
                max_attempts: 3,
                initial_backoff: Duration::from_millis(500),
                backoff_multiplier: 1.6,
                max_jitter: Duration::from_millis(250),
            },
            timeouts: TimeoutConfig {
                connect: Duration::from_secs(5),
                request: Duration::from_secs(15),
            },
            pacing: PacingConfig {
                min: Duration::from_millis(60),
                span: Duration::from_millis(40),
            },
            page_size: 12,
            breadth: SearchBreadth::Fixed(&datasets::QUICK),
        }
    }

    /// Thorough profile: 5 attempts, long timeouts, preferred datasets of 30 results
    #[must_use]
    pub const fn thorough() -> Self {
        Self {
            mode: BuildMode::Thorough,
            retry: RetryConfig {
                max_attempts: 5,
                initial_backoff: Duration::from_millis(750),
                backoff_multiplier: 1.6,
                max_jitter: Duration::from_millis(250),
            },
            timeouts: TimeoutConfig {
                connect: Duration::from_secs(10),
                request: Duration::from_secs(60),
            },
            pacing: PacingConfig {
                min: Duration::from_millis(180),
                span: Duration::from_millis(100),
            },
            page_size: 30,
            breadth: SearchBreadth::GroupPreference,
        }
    }

    /// Same profile without retries or pacing (tests, offline rebuilds)
    #[must_use]
    pub const fn without_delays(mut self) -> Self {
        self.retry = RetryConfig::disabled();
        self.pacing = PacingConfig::NONE;
        self
    }
}

/// Full configuration of one catalog build
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// `FoodData` Central API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Seed list path
    pub seed_path: PathBuf,
    /// Catalog output path
    pub catalog_path: PathBuf,
    /// Response cache path
    pub cache_path: PathBuf,
    /// Quick or thorough
    pub mode: BuildMode,
    /// Ignore the prior catalog (no resume/skip)
    pub force: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: fdc::DEMO_API_KEY.to_owned(),
            base_url: fdc::DEFAULT_BASE_URL.to_owned(),
            seed_path: PathBuf::from(paths::DEFAULT_SEED),
            catalog_path: PathBuf::from(paths::DEFAULT_CATALOG),
            cache_path: PathBuf::from(paths::DEFAULT_CACHE),
            mode: BuildMode::Thorough,
            force: false,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var(env_vars::API_KEY).unwrap_or(defaults.api_key),
            base_url: env::var(env_vars::BASE_URL).unwrap_or(defaults.base_url),
            seed_path: env::var(env_vars::SEED_PATH).map_or(defaults.seed_path, PathBuf::from),
            catalog_path: env::var(env_vars::CATALOG_PATH)
                .map_or(defaults.catalog_path, PathBuf::from),
            cache_path: env::var(env_vars::CACHE_PATH).map_or(defaults.cache_path, PathBuf::from),
            mode: BuildMode::from_env(),
            force: false,
        }
    }

    /// Lookup profile for the configured mode
    #[must_use]
    pub const fn profile(&self) -> LookupProfile {
        self.mode.profile()
    }

    /// Check that a usable credential and base URL are configured
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` for an empty or placeholder API key and
    /// `ConfigInvalid` for a base URL that is not http(s)
    pub fn validate(&self) -> AppResult<()> {
        let key = self.api_key.trim();
        if key.is_empty() || key == fdc::PLACEHOLDER_API_KEY {
            return Err(AppError::config_missing(format!(
                "Add your USDA API key (set {} or pass --api-key)",
                env_vars::API_KEY
            )));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(AppError::config_invalid(format!(
                "{} must be an http(s) URL, got '{}'",
                env_vars::BASE_URL,
                self.base_url
            )));
        }
        Ok(())
    }
}
