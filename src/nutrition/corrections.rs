// ABOUTME: Post-extraction corrections: dry pasta conversion, safe fallbacks, pinned overrides
// ABOUTME: Applied in a fixed order so every item ends with a defined per-100g value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Correction pipeline
//!
//! After extraction, values pass through:
//! 1. dry-to-cooked conversion for branded dry pasta records
//! 2. the plausibility gate, with a safe fallback per key when it fails
//! 3. pinned overrides, which always win

use super::extractor::{extract, ExtractedNutrients};
use super::plausibility::{is_plausible, FoodGroup, Window};
use crate::config::OverrideTables;
use crate::constants::pasta::{
    COOKED_KCAL, COOKED_PROTEIN, CONVERT_MAX_PROTEIN, CONVERT_MIN_KCAL, DRY_BASIS_KCAL,
    DRY_FLAGS, DRY_PASTA_BRANDS, DRY_TO_COOKED_YIELD,
};
use crate::models::{FoodRecord, Per100};

const PASTA: &str = "pasta";

/// Record comes from a dry-pasta brand and is published on a dry basis
#[must_use]
pub fn is_dry_pasta_record(record: &FoodRecord) -> bool {
    let description = record.description.to_lowercase();
    let owner = record
        .brand_owner
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let known_brand = DRY_PASTA_BRANDS
        .iter()
        .any(|brand| owner.contains(brand) || description.contains(brand));
    let flagged_dry = DRY_FLAGS.iter().any(|flag| description.contains(flag));
    let dry_basis = extract(record).kcal.is_some_and(|kcal| kcal >= DRY_BASIS_KCAL);

    known_brand && (flagged_dry || dry_basis)
}

/// Convert dry-basis pasta values to cooked-basis
///
/// Only applies to starches whose display name mentions pasta. Converted
/// values outside the cooked pasta window are discarded in favour of the
/// unconverted ones.
#[must_use]
pub fn apply_dry_pasta_correction(
    group: &FoodGroup,
    display_name: &str,
    record: &FoodRecord,
    values: ExtractedNutrients,
) -> ExtractedNutrients {
    if *group != FoodGroup::WholeGrainsStarches
        || !display_name.to_lowercase().contains(PASTA)
        || !is_dry_pasta_record(record)
    {
        return values;
    }
    let (Some(kcal), Some(protein)) = (values.kcal, values.protein) else {
        return values;
    };
    if protein >= CONVERT_MAX_PROTEIN && kcal < CONVERT_MIN_KCAL {
        return values;
    }

    let cooked_kcal = kcal / DRY_TO_COOKED_YIELD;
    let cooked_protein = protein / DRY_TO_COOKED_YIELD;
    let kcal_window = Window::closed(COOKED_KCAL.0, COOKED_KCAL.1);
    let protein_window = Window::closed(COOKED_PROTEIN.0, COOKED_PROTEIN.1);
    if kcal_window.contains(cooked_kcal) && protein_window.contains(cooked_protein) {
        ExtractedNutrients::new(Some(cooked_kcal), Some(cooked_protein))
    } else {
        values
    }
}

/// How the final value for an item was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Looked-up values passed the gate
    Resolved,
    /// Looked-up values failed; the key's safe fallback was used
    Fallback,
    /// Values failed and no fallback exists; missing values became zero
    Unresolved,
}

/// Final per-100 g value of one item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Value to persist (before rounding)
    pub per100: Per100,
    /// Path taken before any pin
    pub outcome: Outcome,
    /// A pinned override replaced the value
    pub pinned: bool,
}

/// Gate the values, fall back or zero-fill, then apply any pin for `key`
#[must_use]
pub fn finalize(
    key: &str,
    group: &FoodGroup,
    values: ExtractedNutrients,
    overrides: &OverrideTables,
) -> Resolution {
    let (per100, outcome) = if is_plausible(group, values.kcal, values.protein) {
        (
            Per100::new(
                values.kcal.unwrap_or_default(),
                values.protein.unwrap_or_default(),
            ),
            Outcome::Resolved,
        )
    } else if let Some(fallback) = overrides.safe_fallback(key) {
        (fallback, Outcome::Fallback)
    } else {
        (
            Per100::new(
                values.kcal.unwrap_or_default(),
                values.protein.unwrap_or_default(),
            ),
            Outcome::Unresolved,
        )
    };

    match overrides.pinned(key) {
        Some(pinned) => Resolution {
            per100: pinned,
            outcome,
            pinned: true,
        },
        None => Resolution {
            per100,
            outcome,
            pinned: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_pasta_names_are_untouched() {
        let record = FoodRecord::new("1", "Barilla rice, dry").with_macros(356.0, 7.0);
        let values = ExtractedNutrients::new(Some(356.0), Some(7.0));
        let corrected = apply_dry_pasta_correction(
            &FoodGroup::WholeGrainsStarches,
            "barilla rice",
            &record,
            values,
        );
        assert_eq!(corrected, values);
    }

    #[test]
    fn test_unresolved_keeps_present_values() {
        let values = ExtractedNutrients::new(Some(500.0), None);
        let resolution = finalize(
            "mystery",
            &FoodGroup::GreenVegetables,
            values,
            &OverrideTables::empty(),
        );
        assert_eq!(resolution.outcome, Outcome::Unresolved);
        assert_eq!(resolution.per100, Per100::new(500.0, 0.0));
        assert!(!resolution.pinned);
    }
}
