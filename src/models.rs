// ABOUTME: Core data models for seed input, raw FoodData Central records, and catalog output
// ABOUTME: Raw records keep unknown fields so the response cache stays byte-for-byte useful
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - [`Seed`] / [`SeedItem`]: the read-only ingredient list, grouped by food group
//! - [`FoodRecord`] / [`FoodNutrient`]: raw records as returned by `FoodData` Central
//! - [`Per100`] / [`CatalogEntry`] / [`IngredientEntry`] / [`Catalog`]: the persisted catalog
//!
//! Group order and item order are significant in both the seed and the catalog,
//! so grouped mappings use [`OrderedMap`] instead of a hash map.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// String-keyed map that keeps insertion order through serde round-trips
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; an existing key keeps its position and gets the new value
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Mutable lookup, inserting `V::default()` when absent
    pub fn entry_or_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_owned(), V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Render a JSON scalar (string or number) as a trimmed string
fn scalar_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// One ingredient in the seed list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedItem {
    /// Catalog key, unique within its group
    pub key: String,
    /// Display name
    pub name: String,
    /// Known `FoodData` Central id, as string or number
    #[serde(rename = "fdcId", default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<Value>,
}

impl SeedItem {
    /// Build a seed item without a known id
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            fdc_id: None,
        }
    }

    /// Attach a known `FoodData` Central id
    #[must_use]
    pub fn with_fdc_id(mut self, fdc_id: impl Into<String>) -> Self {
        self.fdc_id = Some(Value::String(fdc_id.into()));
        self
    }

    /// The requested id, if one was given and is not blank
    #[must_use]
    pub fn desired_fdc_id(&self) -> Option<String> {
        self.fdc_id.as_ref().and_then(scalar_to_string)
    }
}

/// Seed file: food group name to ordered ingredients
pub type Seed = OrderedMap<Vec<SeedItem>>;

/// Nutrient descriptor nested inside a food-detail nutrient entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientInfo {
    /// Nutrient id (e.g. 1008)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Nutrient number (e.g. "208")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Value>,
    /// Display name (e.g. "Energy")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit name (e.g. "KCAL", "g")
    #[serde(rename = "unitName", default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Nutrient entry; food-detail responses nest a [`NutrientInfo`], search
/// results use flat `nutrientId`/`nutrientNumber`/`nutrientName`/`value` fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodNutrient {
    /// Nested nutrient descriptor (food-detail shape)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrient: Option<NutrientInfo>,
    /// Amount per 100 g (food-detail shape)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Flat nutrient id (search shape)
    #[serde(rename = "nutrientId", default, skip_serializing_if = "Option::is_none")]
    pub nutrient_id: Option<Value>,
    /// Flat nutrient number (search shape)
    #[serde(
        rename = "nutrientNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nutrient_number: Option<Value>,
    /// Flat nutrient name (search shape)
    #[serde(rename = "nutrientName", default, skip_serializing_if = "Option::is_none")]
    pub nutrient_name: Option<String>,
    /// Flat unit name (search shape)
    #[serde(rename = "unitName", default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    /// Flat amount (search shape)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoodNutrient {
    /// Detail-shape entry, as returned by `/food/{fdcId}`
    pub fn detailed(number: &str, name: &str, unit: &str, amount: f64) -> Self {
        Self {
            nutrient: Some(NutrientInfo {
                number: Some(Value::String(number.to_owned())),
                name: Some(name.to_owned()),
                unit_name: Some(unit.to_owned()),
                ..NutrientInfo::default()
            }),
            amount: Some(amount),
            ..Self::default()
        }
    }

    /// Identifiers this entry carries (number and id, both shapes)
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        let nested = self
            .nutrient
            .iter()
            .flat_map(|n| [n.number.as_ref(), n.id.as_ref()]);
        nested
            .chain([self.nutrient_number.as_ref(), self.nutrient_id.as_ref()])
            .flatten()
            .filter_map(scalar_to_string)
            .collect()
    }

    /// Lowercased unit name
    #[must_use]
    pub fn unit(&self) -> String {
        self.nutrient
            .as_ref()
            .and_then(|n| n.unit_name.as_deref())
            .or(self.unit_name.as_deref())
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Lowercased display name
    #[must_use]
    pub fn display_name(&self) -> String {
        self.nutrient
            .as_ref()
            .and_then(|n| n.name.as_deref())
            .or(self.nutrient_name.as_deref())
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Amount per 100 g, whichever shape supplied it
    #[must_use]
    pub fn quantity(&self) -> Option<f64> {
        self.amount.or(self.value)
    }
}

/// Raw `FoodData` Central record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// `FoodData` Central id
    #[serde(rename = "fdcId", default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<Value>,
    /// Food description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Brand owner (branded foods only)
    #[serde(rename = "brandOwner", default, skip_serializing_if = "Option::is_none")]
    pub brand_owner: Option<String>,
    /// Dataset the record belongs to
    #[serde(rename = "dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Search relevance score (search results only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Nutrient list
    #[serde(rename = "foodNutrients", default, deserialize_with = "null_as_default")]
    pub food_nutrients: Vec<FoodNutrient>,
    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoodRecord {
    /// Minimal record with an id and description
    pub fn new(fdc_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            fdc_id: Some(Value::String(fdc_id.into())),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the brand owner
    #[must_use]
    pub fn with_brand_owner(mut self, brand_owner: impl Into<String>) -> Self {
        self.brand_owner = Some(brand_owner.into());
        self
    }

    /// Set the search relevance score
    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Add detail-shape kcal and protein nutrients
    #[must_use]
    pub fn with_macros(mut self, kcal: f64, protein: f64) -> Self {
        self.food_nutrients
            .push(FoodNutrient::detailed("208", "Energy", "KCAL", kcal));
        self.food_nutrients
            .push(FoodNutrient::detailed("203", "Protein", "G", protein));
        self
    }

    /// Id rendered as a string
    #[must_use]
    pub fn fdc_id_string(&self) -> Option<String> {
        self.fdc_id.as_ref().and_then(scalar_to_string)
    }

    /// Lowercased `description + " " + brandOwner`, the selector's haystack
    #[must_use]
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.description,
            self.brand_owner.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}

/// Per-100 g energy and protein
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Per100 {
    /// Kilocalories per 100 g
    pub kcal: f64,
    /// Grams of protein per 100 g
    pub protein: f64,
}

impl Per100 {
    /// All-zero placeholder for unresolved items
    pub const ZERO: Self = Self {
        kcal: 0.0,
        protein: 0.0,
    };

    /// Construct from raw values
    #[must_use]
    pub const fn new(kcal: f64, protein: f64) -> Self {
        Self { kcal, protein }
    }

    /// Both values rounded to two decimals, as persisted
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            kcal: round2(self.kcal),
            protein: round2(self.protein),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One catalog ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name from the seed
    pub name: String,
    /// Resolved `FoodData` Central id, empty when unresolved
    #[serde(rename = "fdcId", default)]
    pub fdc_id: String,
    /// Per-100 g values
    pub per100: Per100,
    /// Unit conversions (not populated yet)
    #[serde(default)]
    pub conversions: Map<String, Value>,
    /// Free-form tags (not populated yet)
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry {
    /// Fresh entry with rounded values and empty conversions/tags
    pub fn new(name: impl Into<String>, fdc_id: impl Into<String>, per100: Per100) -> Self {
        Self {
            name: name.into(),
            fdc_id: fdc_id.into(),
            per100: per100.rounded(),
            conversions: Map::new(),
            tags: Vec::new(),
        }
    }
}

/// Catalog ingredient as written: freshly resolved, or carried over untouched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IngredientEntry {
    /// Produced by this run
    Resolved(CatalogEntry),
    /// Prior catalog entry, written back exactly as it was read
    Reused(Value),
}

impl IngredientEntry {
    /// Per-100 g values, if both are present and numeric
    #[must_use]
    pub fn per100(&self) -> Option<Per100> {
        match self {
            Self::Resolved(entry) => Some(entry.per100),
            Self::Reused(raw) => {
                let per100 = raw.get("per100")?;
                Some(Per100::new(
                    per100.get("kcal")?.as_f64()?,
                    per100.get("protein")?.as_f64()?,
                ))
            }
        }
    }

    /// Non-empty `FoodData` Central id, as a string
    #[must_use]
    pub fn fdc_id(&self) -> Option<String> {
        match self {
            Self::Resolved(entry) => (!entry.fdc_id.is_empty()).then(|| entry.fdc_id.clone()),
            Self::Reused(raw) => raw.get("fdcId").and_then(scalar_to_string),
        }
    }
}

impl<'de> Deserialize<'de> for IngredientEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::Reused)
    }
}

/// The persisted catalog document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Entries keyed by seed key
    pub ingredients: OrderedMap<IngredientEntry>,
    /// Group name to ordered keys
    #[serde(rename = "swapGroups")]
    pub swap_groups: OrderedMap<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ordered_map_keeps_document_order() {
        let seed: Seed = serde_json::from_str(
            r#"{
                "whole_grains_starches": [{"key": "quinoa_cooked", "name": "quinoa"}],
                "breads": [{"key": "gluten_free_bread", "name": "gluten free bread"}],
                "dairy_nondairy": []
            }"#,
        )
        .unwrap();
        let groups: Vec<&str> = seed.keys().collect();
        assert_eq!(groups, ["whole_grains_starches", "breads", "dairy_nondairy"]);
    }

    #[test]
    fn test_seed_fdc_id_accepts_numbers_and_blanks() {
        let numeric: SeedItem =
            serde_json::from_value(json!({"key": "k", "name": "n", "fdcId": 171_477})).unwrap();
        assert_eq!(numeric.desired_fdc_id().as_deref(), Some("171477"));

        let blank: SeedItem =
            serde_json::from_value(json!({"key": "k", "name": "n", "fdcId": "  "})).unwrap();
        assert_eq!(blank.desired_fdc_id(), None);
    }

    #[test]
    fn test_food_record_preserves_unknown_fields() {
        let raw = json!({
            "fdcId": 2_345_678,
            "description": "Pasta, dry",
            "publicationDate": "2021-10-28",
            "foodNutrients": [{"nutrient": {"number": "208", "name": "Energy", "unitName": "kcal", "rank": 300}, "amount": 356.0, "type": "FoodNutrient"}]
        });
        let record: FoodRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.fdc_id_string().as_deref(), Some("2345678"));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_catalog_entry_rounds_to_two_decimals() {
        let entry = CatalogEntry::new("barilla", "1", Per100::new(160.360_36, 5.405_405));
        assert!((entry.per100.kcal - 160.36).abs() < f64::EPSILON);
        assert!((entry.per100.protein - 5.41).abs() < f64::EPSILON);
    }

    #[test]
    fn test_food_record_accepts_null_description_and_nutrients() {
        let record: FoodRecord = serde_json::from_value(json!({
            "fdcId": 42,
            "description": null,
            "foodNutrients": null
        }))
        .unwrap();
        assert_eq!(record.description, "");
        assert!(record.food_nutrients.is_empty());
    }

    #[test]
    fn test_reused_entry_reads_numeric_fields() {
        let entry: IngredientEntry = serde_json::from_value(json!({
            "name": "chicken breast",
            "fdcId": 171_477,
            "per100": {"kcal": 165, "protein": 31},
            "note": "hand-checked"
        }))
        .unwrap();
        assert_eq!(entry.fdc_id().as_deref(), Some("171477"));
        assert_eq!(entry.per100(), Some(Per100::new(165.0, 31.0)));
        assert_eq!(
            serde_json::to_value(&entry).unwrap()["note"],
            json!("hand-checked")
        );
    }
}
