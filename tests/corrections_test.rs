// ABOUTME: Unit tests for dry pasta conversion, safe fallbacks, and pinned overrides
// ABOUTME: Validates conversion windows, revert behavior, and correction precedence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutrition_catalog::config::OverrideTables;
use nutrition_catalog::constants::pasta::DRY_TO_COOKED_YIELD;
use nutrition_catalog::models::{FoodRecord, Per100};
use nutrition_catalog::nutrition::corrections::is_dry_pasta_record;
use nutrition_catalog::nutrition::{
    apply_dry_pasta_correction, extract, finalize, ExtractedNutrients, FoodGroup, Outcome,
};

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < 1e-9)
}

fn correct(display_name: &str, record: &FoodRecord) -> ExtractedNutrients {
    apply_dry_pasta_correction(
        &FoodGroup::WholeGrainsStarches,
        display_name,
        record,
        extract(record),
    )
}

#[test]
fn test_dry_barilla_converts_into_cooked_window() {
    let record = FoodRecord::new("2065123", "PROTEIN+ PENNE, DRY")
        .with_brand_owner("Barilla America Inc.")
        .with_macros(356.0, 12.0);
    let corrected = correct("Barilla Protein+ pasta", &record);

    assert!(approx(corrected.kcal, 356.0 / DRY_TO_COOKED_YIELD));
    assert!(approx(corrected.protein, 12.0 / DRY_TO_COOKED_YIELD));
    let kcal = corrected.kcal.unwrap();
    let protein = corrected.protein.unwrap();
    assert!((120.0..=190.0).contains(&kcal));
    assert!((5.0..=12.0).contains(&protein));
}

#[test]
fn test_high_kcal_marks_dry_basis_without_flags() {
    let record = FoodRecord::new("1", "Barilla spaghetti").with_macros(350.0, 13.0);
    assert!(is_dry_pasta_record(&record));
    let corrected = correct("spaghetti pasta", &record);
    assert!(approx(corrected.kcal, 350.0 / DRY_TO_COOKED_YIELD));
}

#[test]
fn test_conversion_outside_window_reverts() {
    let record = FoodRecord::new("1", "Barilla lentil pasta, uncooked").with_macros(600.0, 30.0);
    let corrected = correct("barilla lentil pasta", &record);
    assert!(approx(corrected.kcal, 600.0));
    assert!(approx(corrected.protein, 30.0));
}

#[test]
fn test_cooked_basis_records_are_untouched() {
    let record = FoodRecord::new("1", "Penne, cooked")
        .with_brand_owner("Barilla")
        .with_macros(157.0, 5.8);
    assert!(!is_dry_pasta_record(&record));
    let corrected = correct("barilla penne pasta", &record);
    assert!(approx(corrected.kcal, 157.0));
}

#[test]
fn test_other_brands_are_untouched() {
    let record = FoodRecord::new("1", "Chickpea pasta, dry").with_macros(360.0, 20.0);
    let corrected = correct("chickpea pasta", &record);
    assert!(approx(corrected.kcal, 360.0));
}

#[test]
fn test_other_groups_are_untouched() {
    let record = FoodRecord::new("1", "Barilla pasta, dry").with_macros(356.0, 12.0);
    let corrected = apply_dry_pasta_correction(
        &FoodGroup::from_name("pantry"),
        "barilla pasta",
        &record,
        extract(&record),
    );
    assert!(approx(corrected.kcal, 356.0));
}

#[test]
fn test_plausible_values_resolve() {
    let resolution = finalize(
        "chicken_breast_cooked",
        &FoodGroup::LeanProteins,
        ExtractedNutrients::new(Some(165.0), Some(31.0)),
        &OverrideTables::builtin(),
    );
    assert_eq!(resolution.outcome, Outcome::Resolved);
    assert_eq!(resolution.per100, Per100::new(165.0, 31.0));
    assert!(!resolution.pinned);
}

#[test]
fn test_implausible_values_use_fallback() {
    let resolution = finalize(
        "spinach_cooked",
        &FoodGroup::GreenVegetables,
        ExtractedNutrients::new(Some(400.0), Some(2.0)),
        &OverrideTables::builtin(),
    );
    assert_eq!(resolution.outcome, Outcome::Fallback);
    assert_eq!(resolution.per100, Per100::new(23.0, 2.9));
}

#[test]
fn test_missing_values_without_fallback_become_zero() {
    let resolution = finalize(
        "mystery_item",
        &FoodGroup::LeanProteins,
        ExtractedNutrients::default(),
        &OverrideTables::builtin(),
    );
    assert_eq!(resolution.outcome, Outcome::Unresolved);
    assert_eq!(resolution.per100, Per100::ZERO);
}

#[test]
fn test_pinned_override_always_wins() {
    let overrides = OverrideTables::builtin();
    let inputs = [
        ExtractedNutrients::new(Some(20.0), Some(1.5)),
        ExtractedNutrients::new(Some(900.0), Some(90.0)),
        ExtractedNutrients::default(),
    ];
    for values in inputs {
        let resolution = finalize("zucchini_cooked", &FoodGroup::GreenVegetables, values, &overrides);
        assert!(resolution.pinned);
        assert_eq!(resolution.per100, Per100::new(17.0, 1.2));
    }
}

#[test]
fn test_custom_tables_replace_builtin() {
    let overrides = OverrideTables::empty()
        .with_fallback("tofu", Per100::new(144.0, 17.3))
        .with_pinned("tempeh", Per100::new(192.0, 20.3));

    let fallback = finalize(
        "tofu",
        &FoodGroup::LeanProteins,
        ExtractedNutrients::default(),
        &overrides,
    );
    assert_eq!(fallback.outcome, Outcome::Fallback);

    let pinned = finalize(
        "tempeh",
        &FoodGroup::LeanProteins,
        ExtractedNutrients::new(Some(192.0), Some(20.3)),
        &overrides,
    );
    assert_eq!(pinned.outcome, Outcome::Resolved);
    assert!(pinned.pinned);

    let zucchini = finalize(
        "zucchini_cooked",
        &FoodGroup::GreenVegetables,
        ExtractedNutrients::default(),
        &overrides,
    );
    assert!(!zucchini.pinned);
}
