// ABOUTME: Constants for FoodData Central access, nutrient identifiers, and catalog defaults
// ABOUTME: Groups values by domain so matching heuristics and I/O defaults live in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants organized by domain

/// `FoodData` Central service settings
pub mod fdc {
    /// Default API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Public demonstration key published by `FoodData` Central
    pub const DEMO_API_KEY: &str = "DEMO_KEY";
    /// Placeholder value shipped in templates; treated as "no key"
    pub const PLACEHOLDER_API_KEY: &str = "REPLACE_WITH_YOUR_KEY";
    /// Service name used in error messages and logs
    pub const SERVICE_NAME: &str = "USDA FoodData Central";
}

/// `FoodData` Central dataset names (the `dataType` search filter)
pub mod datasets {
    /// Analytical data for minimally processed foods
    pub const FOUNDATION: &str = "Foundation";
    /// Standard Reference legacy release
    pub const SR_LEGACY: &str = "SR Legacy";
    /// Food and Nutrient Database for Dietary Studies
    pub const SURVEY: &str = "Survey (FNDDS)";
    /// Manufacturer label data
    pub const BRANDED: &str = "Branded";

    /// Curated sources first, label data last
    pub const CURATED_FIRST: [&str; 4] = [FOUNDATION, SR_LEGACY, SURVEY, BRANDED];
    /// Label data first for packaged goods
    pub const BRANDED_FIRST: [&str; 4] = [BRANDED, FOUNDATION, SR_LEGACY, SURVEY];
    /// Reduced breadth used by quick mode
    pub const QUICK: [&str; 3] = [FOUNDATION, SR_LEGACY, BRANDED];
}

/// Nutrient identifiers and units
pub mod nutrients {
    /// Identifiers meaning "Energy (kcal)": nutrient id and legacy nutrient number
    pub const ENERGY_KCAL_IDS: [&str; 2] = ["1008", "208"];
    /// Identifiers meaning "Protein": nutrient id and legacy nutrient number
    pub const PROTEIN_IDS: [&str; 2] = ["1003", "203"];
    /// Accepted spellings of the kilocalorie unit (lowercase)
    pub const KCAL_UNITS: [&str; 2] = ["kcal", "kcals"];
    /// Gram unit (lowercase)
    pub const GRAM_UNIT: &str = "g";
    /// Display-name fragment for the energy fallback pass
    pub const ENERGY_NAME: &str = "energy";
    /// Display-name fragment for the protein fallback pass
    pub const PROTEIN_NAME: &str = "protein";
}

/// Matching heuristics
pub mod matching {
    /// Product-name fragments that mark an item as a branded product
    ///
    /// One list serves both branded dataset routing and the rule that skips
    /// the cooked qualifier; the two former lists were merged on purpose.
    pub const BRANDED_KEYWORDS: [&str; 6] = [
        "barilla",
        "dave",
        "killer bread",
        "ezekiel",
        "fairlife",
        "almond",
    ];
    /// Word appended to protein/starch queries to favour prepared entries
    pub const COOKED_QUALIFIER: &str = "cooked";
    /// Score awarded when the reference name appears in description or brand
    pub const NAME_MATCH_SCORE: u8 = 2;
}

/// Dry pasta to cooked pasta conversion
pub mod pasta {
    /// Cooked weight gained per unit of dry weight
    pub const DRY_TO_COOKED_YIELD: f64 = 2.22;
    /// Brands whose records are usually published on a dry basis
    pub const DRY_PASTA_BRANDS: [&str; 1] = ["barilla"];
    /// Description flags for dry-basis records
    pub const DRY_FLAGS: [&str; 3] = ["dry", "uncooked", "unprepared"];
    /// kcal per 100 g at or above which a record is assumed dry-basis
    pub const DRY_BASIS_KCAL: f64 = 280.0;
    /// Conversion triggers at or above this kcal
    pub const CONVERT_MIN_KCAL: f64 = 270.0;
    /// Conversion triggers below this protein
    pub const CONVERT_MAX_PROTEIN: f64 = 8.0;
    /// Cooked pasta kcal window checked after conversion
    pub const COOKED_KCAL: (f64, f64) = (120.0, 190.0);
    /// Cooked pasta protein window checked after conversion
    pub const COOKED_PROTEIN: (f64, f64) = (5.0, 12.0);
}

/// Default file locations
pub mod paths {
    /// Seed list
    pub const DEFAULT_SEED: &str = "catalog.seed.json";
    /// Catalog output
    pub const DEFAULT_CATALOG: &str = "catalog.json";
    /// Raw response cache
    pub const DEFAULT_CACHE: &str = "usda_cache.json";
}

/// Environment variable names
pub mod env_vars {
    /// `FoodData` Central API key
    pub const API_KEY: &str = "FDC_API_KEY";
    /// API base URL override
    pub const BASE_URL: &str = "FDC_API_BASE_URL";
    /// Seed file path
    pub const SEED_PATH: &str = "CATALOG_SEED_PATH";
    /// Catalog output path
    pub const CATALOG_PATH: &str = "CATALOG_OUTPUT_PATH";
    /// Cache file path
    pub const CACHE_PATH: &str = "CATALOG_CACHE_PATH";
    /// `1` selects quick mode
    pub const QUICK: &str = "QUICK";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the catalog builder service
    pub const CATALOG_BUILDER: &str = "nutrition-catalog";
}
