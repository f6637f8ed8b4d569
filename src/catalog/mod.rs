// ABOUTME: Catalog construction and persistence
// ABOUTME: Sequential builder over the seed list plus seed/catalog file handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Sequential catalog builder
pub mod builder;
/// Seed, catalog, and prior-catalog files
pub mod store;

pub use builder::{BuildReport, BuildSummary, CatalogBuilder};
pub use store::{load_seed, write_catalog, ExistingCatalog};
