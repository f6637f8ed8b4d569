// ABOUTME: Seed and catalog file persistence, plus the prior catalog used for resume
// ABOUTME: Seed errors are fatal; prior catalog problems degrade to an empty catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::models::{Catalog, IngredientEntry, Seed};
use crate::nutrition::{is_plausible, FoodGroup};
use crate::utils::json_file::{self, LoadOutcome};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Read the seed list
///
/// # Errors
///
/// Returns an error if the file is missing or is not a valid seed document
pub fn load_seed(path: &Path) -> AppResult<Seed> {
    json_file::read_json(path)
}

/// Write the catalog, replacing any previous file
///
/// # Errors
///
/// Returns an error if the catalog cannot be serialized or written
pub fn write_catalog(path: &Path, catalog: &Catalog) -> AppResult<()> {
    json_file::write_json_pretty(path, catalog)?;
    debug!(
        path = %path.display(),
        ingredients = catalog.ingredients.len(),
        "Catalog written"
    );
    Ok(())
}

/// Ingredients from a previous run's catalog
///
/// Entries are kept as raw JSON and parsed one at a time, so a single
/// malformed entry does not discard the rest.
#[derive(Debug, Clone, Default)]
pub struct ExistingCatalog {
    ingredients: Map<String, Value>,
}

impl ExistingCatalog {
    /// No prior catalog
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the prior catalog; absent or corrupt files yield an empty one
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let outcome: LoadOutcome<Value> = json_file::load_json(path).logged("prior catalog", path);
        outcome
            .unwrap_or_default()
            .as_object()
            .map_or_else(Self::empty, Self::from_document)
    }

    /// Wrap a parsed catalog document
    #[must_use]
    pub fn from_document(document: &Map<String, Value>) -> Self {
        let ingredients = document
            .get("ingredients")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self { ingredients }
    }

    /// Number of prior entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// No prior entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Prior entry for `key`, unchanged, if its values are plausible for `group`
    #[must_use]
    pub fn reusable_entry(&self, key: &str, group: &FoodGroup) -> Option<IngredientEntry> {
        let entry = IngredientEntry::Reused(self.ingredients.get(key)?.clone());
        let per100 = entry.per100()?;
        is_plausible(group, Some(per100.kcal), Some(per100.protein)).then_some(entry)
    }
}
