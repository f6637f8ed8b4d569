// ABOUTME: Per-ingredient override tables: curated search hints, safe fallbacks, pinned values
// ABOUTME: Static configuration keyed by seed key, consulted by the correction pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ingredient override tables
//!
//! - **Name hints** steer searches for stubborn items to the right cooked entry.
//! - **Safe fallbacks** replace a match that fails the plausibility gate.
//! - **Pinned overrides** replace the final values unconditionally.

use crate::models::Per100;
use std::collections::HashMap;

/// Curated search queries (cooked entries; "without salt" matches SR Legacy naming)
const NAME_HINTS: &[(&str, &str)] = &[
    // proteins
    ("chicken_breast_cooked", "chicken breast, cooked, grilled"),
    ("ground_turkey_93_cooked", "turkey, ground, 93% lean, cooked, crumbles"),
    (
        "ground_beef_93_cooked",
        "beef, ground, 93% lean meat / 7% fat, cooked, crumbles",
    ),
    ("top_sirloin_cooked", "beef top sirloin steak, cooked, grilled"),
    ("salmon_cooked", "salmon, atlantic, farmed, cooked, dry heat"),
    ("shrimp_cooked", "shrimp, cooked"),
    ("cod_cooked", "cod, cooked, baked, dry heat"),
    ("ground_chicken_cooked", "chicken, ground, cooked, crumbles"),
    // grains and starches
    ("brown_rice_cooked", "rice, brown, long-grain, cooked, without salt"),
    ("jasmine_rice_cooked", "rice, white, jasmine, cooked, without salt"),
    ("quinoa_cooked", "quinoa, cooked"),
    ("farro_cooked", "farro (emmer), cooked"),
    // pasta is mostly listed dry; the correction pipeline converts it
    ("barilla_protein_plus_pasta_cooked", "Barilla Protein+ pasta"),
    ("chickpea_pasta_cooked", "pasta, chickpea"),
    // vegetables
    ("zucchini_cooked", "zucchini, cooked, boiled, drained, without salt"),
    ("spinach_cooked", "spinach, cooked, boiled, drained, without salt"),
    // dairy and non-dairy
    ("nonfat_greek_yogurt", "yogurt, greek, nonfat, plain"),
    ("unsweetened_almond_milk", "almond milk, unsweetened"),
    (
        "light_string_cheese",
        "cheese, mozzarella, low moisture, part-skim, string",
    ),
    ("part_skim_mozzarella", "cheese, mozzarella, part-skim, low moisture"),
    // bread
    ("gluten_free_bread", "bread, gluten-free"),
];

/// Per-100 g values used when the resolved match is implausible
const SAFE_FALLBACKS: &[(&str, f64, f64)] = &[
    ("ground_turkey_93_cooked", 170.0, 22.0),
    ("salmon_cooked", 184.0, 29.0),
    ("farro_cooked", 125.0, 4.5),
    ("gluten_free_bread", 240.0, 5.0),
    ("zucchini_cooked", 17.0, 1.2),
    ("spinach_cooked", 23.0, 2.9),
    ("nonfat_greek_yogurt", 59.0, 10.0),
    ("unsweetened_almond_milk", 15.0, 0.6),
    ("light_string_cheese", 215.0, 25.0),
    ("part_skim_mozzarella", 280.0, 24.0),
    ("brown_rice_cooked", 123.0, 2.6),
    ("jasmine_rice_cooked", 130.0, 2.4),
    ("quinoa_cooked", 120.0, 4.4),
    ("barilla_protein_plus_pasta_cooked", 155.0, 10.0),
    ("chickpea_pasta_cooked", 155.0, 9.0),
];

/// Values forced on every run
const PINNED_OVERRIDES: &[(&str, f64, f64)] = &[
    ("zucchini_cooked", 17.0, 1.2),
    ("salmon_cooked", 184.0, 29.0),
    ("barilla_protein_plus_pasta_cooked", 155.0, 10.0),
];

/// Override tables keyed by seed key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideTables {
    name_hints: HashMap<String, String>,
    safe_fallbacks: HashMap<String, Per100>,
    pinned: HashMap<String, Per100>,
}

impl OverrideTables {
    /// Tables with no entries
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shipped tables
    #[must_use]
    pub fn builtin() -> Self {
        let to_map = |rows: &[(&str, f64, f64)]| {
            rows.iter()
                .map(|&(key, kcal, protein)| (key.to_owned(), Per100::new(kcal, protein)))
                .collect()
        };
        Self {
            name_hints: NAME_HINTS
                .iter()
                .map(|&(key, hint)| (key.to_owned(), hint.to_owned()))
                .collect(),
            safe_fallbacks: to_map(SAFE_FALLBACKS),
            pinned: to_map(PINNED_OVERRIDES),
        }
    }

    /// Add or replace a name hint
    #[must_use]
    pub fn with_name_hint(mut self, key: impl Into<String>, hint: impl Into<String>) -> Self {
        self.name_hints.insert(key.into(), hint.into());
        self
    }

    /// Add or replace a safe fallback
    #[must_use]
    pub fn with_fallback(mut self, key: impl Into<String>, per100: Per100) -> Self {
        self.safe_fallbacks.insert(key.into(), per100);
        self
    }

    /// Add or replace a pinned override
    #[must_use]
    pub fn with_pinned(mut self, key: impl Into<String>, per100: Per100) -> Self {
        self.pinned.insert(key.into(), per100);
        self
    }

    /// Curated search query for a key
    #[must_use]
    pub fn name_hint(&self, key: &str) -> Option<&str> {
        self.name_hints.get(key).map(String::as_str)
    }

    /// Safe fallback for a key
    #[must_use]
    pub fn safe_fallback(&self, key: &str) -> Option<Per100> {
        self.safe_fallbacks.get(key).copied()
    }

    /// Pinned override for a key
    #[must_use]
    pub fn pinned(&self, key: &str) -> Option<Per100> {
        self.pinned.get(key).copied()
    }
}
