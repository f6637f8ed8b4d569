// ABOUTME: Nutrition matching core: extraction, plausibility, candidate selection, corrections
// ABOUTME: Pure functions over FoodData Central records; no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Dry pasta conversion, fallbacks, and pinned overrides
pub mod corrections;
/// Energy and protein extraction from raw records
pub mod extractor;
/// Food groups and plausibility windows
pub mod plausibility;
/// Candidate ranking and search query policy
pub mod selector;

pub use corrections::{apply_dry_pasta_correction, finalize, Outcome, Resolution};
pub use extractor::{extract, ExtractedNutrients};
pub use plausibility::{is_plausible, FoodGroup, GroupPolicy};
pub use selector::{build_query, dataset_preference, is_branded_like, select_best};
