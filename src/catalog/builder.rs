// ABOUTME: Sequential catalog build over the seed list: resume, lookup, correct, pace
// ABOUTME: Always produces one entry per seed key; per-item failures become warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Catalog builder
//!
//! Items are processed strictly in seed order with one outstanding request at
//! a time. For each key the builder:
//! 1. reuses a plausible entry from the prior catalog (no lookups, no pacing)
//! 2. fetches the seed's `fdcId` directly and keeps it if plausible
//! 3. otherwise searches by name and fetches the best candidate
//! 4. extracts, corrects, gates, falls back, and applies pins
//! 5. sleeps a short randomized interval before the next item

use super::store::ExistingCatalog;
use crate::config::{BuildMode, LookupProfile, OverrideTables, PacingConfig};
use crate::external::retry::jitter;
use crate::external::{FoodDataSource, LookupClient};
use crate::models::{Catalog, CatalogEntry, FoodRecord, IngredientEntry, Seed, SeedItem};
use crate::nutrition::{
    apply_dry_pasta_correction, build_query, dataset_preference, extract, finalize,
    is_branded_like, is_plausible, select_best, ExtractedNutrients, FoodGroup, Outcome,
};
use tracing::{debug, info, warn};

/// Per-outcome item counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Looked up and plausible
    pub ok: usize,
    /// Replaced by a safe fallback
    pub fallback: usize,
    /// Unresolved, written with zeros or implausible values
    pub warnings: usize,
    /// Reused from the prior catalog
    pub skipped: usize,
    /// Replaced by a pinned override (also counted in one of the above)
    pub pinned: usize,
}

impl BuildSummary {
    /// Items processed
    #[must_use]
    pub const fn total(&self) -> usize {
        self.ok + self.fallback + self.warnings + self.skipped
    }

    fn record(&mut self, outcome: Outcome, pinned: bool) {
        match outcome {
            Outcome::Resolved => self.ok += 1,
            Outcome::Fallback => self.fallback += 1,
            Outcome::Unresolved => self.warnings += 1,
        }
        if pinned {
            self.pinned += 1;
        }
    }
}

/// Result of a build: the catalog to persist and its counts
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    /// Catalog document
    pub catalog: Catalog,
    /// Counts per outcome
    pub summary: BuildSummary,
}

/// Record chosen for an item and the id to write for it
struct Lookup {
    record: Option<FoodRecord>,
    fdc_id: Option<String>,
}

/// Orchestrates a catalog build against a [`FoodDataSource`]
pub struct CatalogBuilder<S> {
    lookup: LookupClient<S>,
    overrides: OverrideTables,
    profile: LookupProfile,
    force: bool,
}

impl<S: FoodDataSource> CatalogBuilder<S> {
    /// Builder with the built-in override tables
    #[must_use]
    pub fn new(lookup: LookupClient<S>, profile: LookupProfile) -> Self {
        Self {
            lookup,
            overrides: OverrideTables::builtin(),
            profile,
            force: false,
        }
    }

    /// Replace the override tables
    #[must_use]
    pub fn with_overrides(mut self, overrides: OverrideTables) -> Self {
        self.overrides = overrides;
        self
    }

    /// Ignore the prior catalog when `force` is set
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Resolve every seed item, in seed order
    pub async fn build(&mut self, seed: &Seed, existing: &ExistingCatalog) -> BuildReport {
        let mut catalog = Catalog::default();
        let mut summary = BuildSummary::default();

        for (group_name, items) in seed.iter() {
            let group = FoodGroup::from_name(group_name);
            catalog.swap_groups.entry_or_default(group_name);

            for item in items {
                if !self.force {
                    if let Some(entry) = existing.reusable_entry(&item.key, &group) {
                        info!(key = %item.key, group = %group, "Prior entry plausible, skipping");
                        catalog.ingredients.insert(item.key.clone(), entry);
                        catalog.swap_groups.entry_or_default(group_name).push(item.key.clone());
                        summary.skipped += 1;
                        continue;
                    }
                }

                let entry = self.resolve_item(&group, item, &mut summary).await;
                catalog
                    .ingredients
                    .insert(item.key.clone(), IngredientEntry::Resolved(entry));
                catalog.swap_groups.entry_or_default(group_name).push(item.key.clone());
                pace(&self.profile.pacing).await;
            }
        }

        BuildReport { catalog, summary }
    }

    async fn resolve_item(
        &mut self,
        group: &FoodGroup,
        item: &SeedItem,
        summary: &mut BuildSummary,
    ) -> CatalogEntry {
        let desired = item.desired_fdc_id();
        let lookup = match self.direct_lookup(desired.as_deref(), group).await {
            Some(record) => Lookup {
                record: Some(record),
                fdc_id: desired.clone(),
            },
            None => self.search_lookup(group, item, desired).await,
        };

        let values = lookup
            .record
            .as_ref()
            .map_or_else(ExtractedNutrients::default, |record| {
                apply_dry_pasta_correction(group, &item.name, record, extract(record))
            });

        let resolution = finalize(&item.key, group, values, &self.overrides);
        let fdc_id = lookup.fdc_id.unwrap_or_default();
        match resolution.outcome {
            Outcome::Resolved => info!(
                key = %item.key,
                fdc_id = %fdc_id,
                kcal = resolution.per100.kcal,
                protein = resolution.per100.protein,
                "Resolved"
            ),
            Outcome::Fallback => info!(
                key = %item.key,
                tag = fallback_tag(self.profile.mode),
                kcal = resolution.per100.kcal,
                protein = resolution.per100.protein,
                "Using safe fallback"
            ),
            Outcome::Unresolved => warn!(key = %item.key, group = %group, "Unresolved, writing zeros"),
        }
        if resolution.pinned {
            info!(
                key = %item.key,
                kcal = resolution.per100.kcal,
                protein = resolution.per100.protein,
                "Pinned override applied"
            );
        }
        summary.record(resolution.outcome, resolution.pinned);

        CatalogEntry::new(item.name.clone(), fdc_id, resolution.per100)
    }

    /// Seed-specified record, kept only if it passes the gate
    async fn direct_lookup(
        &mut self,
        fdc_id: Option<&str>,
        group: &FoodGroup,
    ) -> Option<FoodRecord> {
        let fdc_id = fdc_id?;
        match self.lookup.fetch_by_id(fdc_id).await {
            Ok(record) => {
                let values = extract(&record);
                if is_plausible(group, values.kcal, values.protein) {
                    Some(record)
                } else {
                    debug!(fdc_id, group = %group, "Seed record implausible, searching instead");
                    None
                }
            }
            Err(error) => {
                warn!(fdc_id, error = %error, "Seed record lookup failed, searching instead");
                None
            }
        }
    }

    /// Search by name, pick the best candidate, and fetch its full record
    async fn search_lookup(
        &mut self,
        group: &FoodGroup,
        item: &SeedItem,
        desired: Option<String>,
    ) -> Lookup {
        let branded_like = is_branded_like(&item.name);
        let query = build_query(&item.key, &item.name, group, branded_like, &self.overrides);
        let datasets = dataset_preference(&item.name, group, &self.profile);
        let candidates = self
            .lookup
            .search_by_name(&query, datasets, self.profile.page_size)
            .await;

        let Some(best) = select_best(&candidates, group, &item.name) else {
            debug!(key = %item.key, query = %query, "No candidates");
            return Lookup {
                record: None,
                fdc_id: desired,
            };
        };

        let Some(fdc_id) = best.fdc_id_string() else {
            debug!(key = %item.key, "Best candidate has no id");
            return Lookup {
                record: None,
                fdc_id: desired,
            };
        };

        let record = match self.lookup.fetch_by_id(&fdc_id).await {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(fdc_id = %fdc_id, error = %error, "Detail fetch failed");
                None
            }
        };
        Lookup {
            record,
            fdc_id: Some(fdc_id),
        }
    }

    /// Lookup client, including its cache
    pub const fn lookup(&self) -> &LookupClient<S> {
        &self.lookup
    }

    /// Release the lookup client so its cache can be saved
    pub fn into_lookup(self) -> LookupClient<S> {
        self.lookup
    }
}

const fn fallback_tag(mode: BuildMode) -> &'static str {
    match mode {
        BuildMode::Quick => "QUICK-FB",
        BuildMode::Thorough => "FALLBACK",
    }
}

/// Sleep `min` plus up to `span` between items
async fn pace(pacing: &PacingConfig) {
    let delay = pacing.min + jitter(pacing.span);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
