// ABOUTME: Food groups and their plausibility windows for per-100g kcal and protein
// ABOUTME: Each group carries its numeric ranges and dataset/query policy as data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plausibility gate
//!
//! The windows encode realistic nutrient density per 100 g of the cooked or
//! ready-to-eat food. Every resolved value must pass the gate for its group
//! before it is trusted.

use crate::constants::datasets::{BRANDED_FIRST, CURATED_FIRST};
use std::fmt;

/// Inclusive numeric window; `open_min` makes the lower bound exclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
    /// Exclude `min` itself
    pub open_min: bool,
}

impl Window {
    /// `[min, max]`
    #[must_use]
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            open_min: false,
        }
    }

    /// `[min, +inf)`
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self::closed(min, f64::INFINITY)
    }

    /// `(min, +inf)`
    #[must_use]
    pub const fn above(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
            open_min: true,
        }
    }

    /// Whether `value` lies in the window; NaN never does
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.open_min {
            value > self.min
        } else {
            value >= self.min
        };
        above_min && value <= self.max
    }
}

/// How a group searches and gates candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupPolicy {
    /// Plausible kcal per 100 g
    pub kcal: Window,
    /// Plausible protein per 100 g
    pub protein: Window,
    /// Datasets in preference order
    pub datasets: &'static [&'static str],
    /// Branded-looking items switch to `Branded` first
    pub branded_routing: bool,
    /// Append "cooked" to queries for this group
    pub cooked_query: bool,
}

const LEAN_PROTEINS: GroupPolicy = GroupPolicy {
    kcal: Window::closed(90.0, 260.0),
    protein: Window::at_least(18.0),
    datasets: &CURATED_FIRST,
    branded_routing: false,
    cooked_query: true,
};

const WHOLE_GRAINS_STARCHES: GroupPolicy = GroupPolicy {
    kcal: Window::closed(60.0, 190.0),
    protein: Window::closed(1.0, 12.0),
    datasets: &CURATED_FIRST,
    branded_routing: false,
    cooked_query: true,
};

const BREADS: GroupPolicy = GroupPolicy {
    kcal: Window::closed(180.0, 340.0),
    protein: Window::closed(3.0, 18.0),
    datasets: &BRANDED_FIRST,
    branded_routing: true,
    cooked_query: false,
};

const GREEN_VEGETABLES: GroupPolicy = GroupPolicy {
    kcal: Window::closed(10.0, 80.0),
    protein: Window::closed(0.3, 7.0),
    datasets: &CURATED_FIRST,
    branded_routing: false,
    cooked_query: false,
};

// widened for cheese and yogurt
const DAIRY_NONDAIRY: GroupPolicy = GroupPolicy {
    kcal: Window::closed(15.0, 350.0),
    protein: Window::closed(0.0, 30.0),
    datasets: &BRANDED_FIRST,
    branded_routing: true,
    cooked_query: false,
};

const OTHER: GroupPolicy = GroupPolicy {
    kcal: Window::above(0.0),
    protein: Window::at_least(0.0),
    datasets: &CURATED_FIRST,
    branded_routing: true,
    cooked_query: false,
};

/// Food group of a seed item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FoodGroup {
    /// Cooked meat, poultry, and seafood
    LeanProteins,
    /// Cooked grains, rice, and pasta
    WholeGrainsStarches,
    /// Breads
    Breads,
    /// Cooked green vegetables
    GreenVegetables,
    /// Milk, yogurt, cheese, and plant-based alternatives
    DairyNondairy,
    /// Any group name not listed above
    Other(String),
}

impl FoodGroup {
    /// Parse a seed group name; unknown names become [`FoodGroup::Other`]
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "lean_proteins" => Self::LeanProteins,
            "whole_grains_starches" => Self::WholeGrainsStarches,
            "breads" => Self::Breads,
            "green_vegetables" => Self::GreenVegetables,
            "dairy_nondairy" => Self::DairyNondairy,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Seed group name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::LeanProteins => "lean_proteins",
            Self::WholeGrainsStarches => "whole_grains_starches",
            Self::Breads => "breads",
            Self::GreenVegetables => "green_vegetables",
            Self::DairyNondairy => "dairy_nondairy",
            Self::Other(name) => name,
        }
    }

    /// Ranges and search policy for this group
    #[must_use]
    pub const fn policy(&self) -> &'static GroupPolicy {
        match self {
            Self::LeanProteins => &LEAN_PROTEINS,
            Self::WholeGrainsStarches => &WHOLE_GRAINS_STARCHES,
            Self::Breads => &BREADS,
            Self::GreenVegetables => &GREEN_VEGETABLES,
            Self::DairyNondairy => &DAIRY_NONDAIRY,
            Self::Other(_) => &OTHER,
        }
    }
}

impl fmt::Display for FoodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether (kcal, protein) is realistic for the group; missing values never are
#[must_use]
pub fn is_plausible(group: &FoodGroup, kcal: Option<f64>, protein: Option<f64>) -> bool {
    let (Some(kcal), Some(protein)) = (kcal, protein) else {
        return false;
    };
    let policy = group.policy();
    policy.kcal.contains(kcal) && policy.protein.contains(protein)
}
