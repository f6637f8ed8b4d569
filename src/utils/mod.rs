// ABOUTME: Utility modules shared by the cache store and catalog persistence
// ABOUTME: Contains lenient JSON file loading and pretty-printed writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON file loading with absent/corrupt distinction
pub mod json_file;
