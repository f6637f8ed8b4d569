// ABOUTME: JSON document loading that distinguishes absent, corrupt, and loaded files
// ABOUTME: Used for the response cache and prior catalog, both of which default to empty state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Result of reading an optional JSON document
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// File read and parsed
    Loaded(T),
    /// File does not exist
    Absent,
    /// File exists but could not be read or parsed
    Corrupt(AppError),
}

impl<T> LoadOutcome<T> {
    /// Parsed value, or `T::default()` for absent/corrupt files
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Loaded(value) => value,
            Self::Absent | Self::Corrupt(_) => T::default(),
        }
    }

    /// Log the outcome under the given document label
    #[must_use]
    pub fn logged(self, label: &str, path: &Path) -> Self {
        match &self {
            Self::Loaded(_) => debug!(path = %path.display(), "Loaded {label}"),
            Self::Absent => debug!(path = %path.display(), "No {label} found, starting empty"),
            Self::Corrupt(error) => {
                warn!(path = %path.display(), error = %error, "Ignoring unreadable {label}");
            }
        }
        self
    }
}

/// Read and parse an optional JSON document without failing
pub fn load_json<T: DeserializeOwned>(path: &Path) -> LoadOutcome<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => return LoadOutcome::Absent,
        Err(error) => {
            return LoadOutcome::Corrupt(
                AppError::from(error).with_resource_id(path.display().to_string()),
            )
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => LoadOutcome::Loaded(value),
        Err(error) => LoadOutcome::Corrupt(
            AppError::from(error).with_resource_id(path.display().to_string()),
        ),
    }
}

/// Read and parse a required JSON document
///
/// # Errors
///
/// Returns `ResourceNotFound` when the file is missing, `StorageError` when it
/// cannot be read, and `SerializationError` when it does not parse as `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    match load_json(path) {
        LoadOutcome::Loaded(value) => Ok(value),
        LoadOutcome::Absent => {
            Err(AppError::not_found("JSON file").with_resource_id(path.display().to_string()))
        }
        LoadOutcome::Corrupt(error) => Err(error),
    }
}

/// Serialize `value` as pretty-printed JSON, replacing the file
///
/// # Errors
///
/// Returns an error if serialization or the write fails
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
        .map_err(|e| AppError::from(e).with_resource_id(path.display().to_string()))
}
