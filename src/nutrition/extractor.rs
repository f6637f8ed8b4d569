// ABOUTME: Extracts per-100g energy (kcal) and protein (g) from a raw FoodData Central record
// ABOUTME: Matches nutrient identifiers first, then falls back to display-name matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::nutrients::{
    ENERGY_KCAL_IDS, ENERGY_NAME, GRAM_UNIT, KCAL_UNITS, PROTEIN_IDS, PROTEIN_NAME,
};
use crate::models::{FoodNutrient, FoodRecord};

/// Values pulled out of a record; either may be missing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtractedNutrients {
    /// Kilocalories per 100 g
    pub kcal: Option<f64>,
    /// Grams of protein per 100 g
    pub protein: Option<f64>,
}

impl ExtractedNutrients {
    /// Construct from optional values
    #[must_use]
    pub const fn new(kcal: Option<f64>, protein: Option<f64>) -> Self {
        Self { kcal, protein }
    }

    /// Both values present
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.kcal.is_some() && self.protein.is_some()
    }
}

fn is_kcal(nutrient: &FoodNutrient) -> bool {
    KCAL_UNITS.contains(&nutrient.unit().as_str())
}

fn is_grams(nutrient: &FoodNutrient) -> bool {
    nutrient.unit() == GRAM_UNIT
}

fn has_identifier(nutrient: &FoodNutrient, ids: &[&str]) -> bool {
    nutrient
        .identifiers()
        .iter()
        .any(|id| ids.contains(&id.as_str()))
}

/// First amount among entries accepted by `matches`
fn first_amount(record: &FoodRecord, matches: impl Fn(&FoodNutrient) -> bool) -> Option<f64> {
    record
        .food_nutrients
        .iter()
        .filter(|n| matches(*n))
        .find_map(FoodNutrient::quantity)
}

/// Energy and protein per 100 g; never fails
#[must_use]
pub fn extract(record: &FoodRecord) -> ExtractedNutrients {
    let mut kcal = first_amount(record, |n| has_identifier(n, &ENERGY_KCAL_IDS) && is_kcal(n));
    let mut protein = first_amount(record, |n| has_identifier(n, &PROTEIN_IDS) && is_grams(n));

    if kcal.is_none() {
        kcal = first_amount(record, |n| n.display_name().contains(ENERGY_NAME) && is_kcal(n));
    }
    if protein.is_none() {
        protein = first_amount(record, |n| {
            n.display_name().contains(PROTEIN_NAME) && is_grams(n)
        });
    }

    ExtractedNutrients { kcal, protein }
}
