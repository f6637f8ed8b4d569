// ABOUTME: Candidate ranking, dataset preference, and query construction for name searches
// ABOUTME: Scores candidates on (plausible, name match, source score) with a stable sort
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::extractor::extract;
use super::plausibility::{is_plausible, FoodGroup};
use crate::config::{LookupProfile, OverrideTables, SearchBreadth};
use crate::constants::datasets::BRANDED_FIRST;
use crate::constants::matching::{BRANDED_KEYWORDS, COOKED_QUALIFIER, NAME_MATCH_SCORE};
use crate::models::FoodRecord;
use std::cmp::Ordering;

/// Lexicographic ranking key of one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    /// Extracted values pass the group's gate
    pub plausible: bool,
    /// [`NAME_MATCH_SCORE`] when the reference name appears in description or brand
    pub name_match: u8,
    /// Relevance reported by the source, 0 when absent
    pub source_score: f64,
}

impl CandidateScore {
    /// Score `record` for `group` against `reference_name`
    #[must_use]
    pub fn of(record: &FoodRecord, group: &FoodGroup, reference_name: &str) -> Self {
        let values = extract(record);
        let haystack = record.search_text();
        Self {
            plausible: is_plausible(group, values.kcal, values.protein),
            name_match: if haystack.contains(&reference_name.to_lowercase()) {
                NAME_MATCH_SCORE
            } else {
                0
            },
            source_score: record.score.unwrap_or(0.0),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.plausible
            .cmp(&other.plausible)
            .then(self.name_match.cmp(&other.name_match))
            .then(self.source_score.total_cmp(&other.source_score))
    }
}

/// Candidates ordered best first; equal scores keep their input order
#[must_use]
pub fn rank_candidates<'a>(
    candidates: &'a [FoodRecord],
    group: &FoodGroup,
    reference_name: &str,
) -> Vec<(&'a FoodRecord, CandidateScore)> {
    let mut ranked: Vec<_> = candidates
        .iter()
        .map(|record| (record, CandidateScore::of(record, group, reference_name)))
        .collect();
    ranked.sort_by(|(_, a), (_, b)| b.compare(a));
    ranked
}

/// Best candidate for the group, or `None` for an empty list
#[must_use]
pub fn select_best<'a>(
    candidates: &'a [FoodRecord],
    group: &FoodGroup,
    reference_name: &str,
) -> Option<&'a FoodRecord> {
    rank_candidates(candidates, group, reference_name)
        .first()
        .map(|(record, _)| *record)
}

/// Display name looks like a branded product
#[must_use]
pub fn is_branded_like(name: &str) -> bool {
    let name = name.to_lowercase();
    BRANDED_KEYWORDS.iter().any(|word| name.contains(word))
}

/// Datasets to search, in order, for an item of `group` named `name`
#[must_use]
pub fn dataset_preference(
    name: &str,
    group: &FoodGroup,
    profile: &LookupProfile,
) -> &'static [&'static str] {
    match profile.breadth {
        SearchBreadth::Fixed(datasets) => datasets,
        SearchBreadth::GroupPreference => {
            let policy = group.policy();
            if policy.branded_routing && is_branded_like(name) {
                &BRANDED_FIRST
            } else {
                policy.datasets
            }
        }
    }
}

/// Search query for a seed item: the curated hint if any, else the display
/// name, with "cooked" appended for protein and starch groups
#[must_use]
pub fn build_query(
    key: &str,
    name: &str,
    group: &FoodGroup,
    branded_like: bool,
    overrides: &OverrideTables,
) -> String {
    let base = overrides.name_hint(key).unwrap_or(name);
    if branded_like
        || !group.policy().cooked_query
        || base.to_lowercase().contains(COOKED_QUALIFIER)
    {
        return base.to_owned();
    }
    format!("{base} {COOKED_QUALIFIER}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_match_is_case_insensitive() {
        let record = FoodRecord::new("1", "CHICKEN BREAST, roasted").with_macros(165.0, 31.0);
        let score = CandidateScore::of(&record, &FoodGroup::LeanProteins, "Chicken Breast");
        assert!(score.plausible);
        assert_eq!(score.name_match, NAME_MATCH_SCORE);
        assert!(score.source_score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_cooked_not_appended_twice() {
        let overrides = OverrideTables::empty();
        let query = build_query(
            "rice",
            "Rice, Cooked",
            &FoodGroup::WholeGrainsStarches,
            false,
            &overrides,
        );
        assert_eq!(query, "Rice, Cooked");
    }
}
