//! # File I/O Module
//!
//! Saves and loads footing design inputs.
//!
//! ## File Format
//!
//! Footing files (`.ftg`) are JSON envelopes:
//!
//! ```json
//! { "version": "0.1.0", "saved_at": "2026-01-01T00:00:00Z", "input": { ... } }
//! ```
//!
//! A bare [`FootingInput`] JSON object is also accepted on load.
//! Saves are atomic: write to `.tmp`, fsync, rename.
//!
//! ## Example
//!
//! ```rust,no_run
//! use footing_core::file_io::{load_input, save_input};
//! use footing_core::footing::FootingInput;
//! use std::path::Path;
//!
//! let path = Path::new("F-1.ftg");
//! save_input(&FootingInput::default(), path)?;
//! let input = load_input(path)?;
//! # Ok::<(), footing_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::footing::FootingInput;

/// Current schema version for .ftg files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// On-disk envelope around a footing input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootingFile {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub input: FootingInput,
}

impl FootingFile {
    pub fn new(input: FootingInput) -> Self {
        FootingFile {
            version: SCHEMA_VERSION.to_string(),
            saved_at: Utc::now(),
            input,
        }
    }
}

/// Save a footing input with atomic write semantics.
pub fn save_input(input: &FootingInput, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(&FootingFile::new(input.clone()))?;

    let tmp_path = path.with_extension("ftg.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), "saved footing input");
    Ok(())
}

/// Load and validate a footing input.
///
/// # Returns
///
/// * `Ok(FootingInput)` - Loaded and validated
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON or unknown bar size
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::InvalidInput)` - Parsed, but fails validation
pub fn load_input(path: &Path) -> CalcResult<FootingInput> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let input = parse_input(&contents)
        .map_err(|e| match e {
            CalcError::SerializationError { reason } => CalcError::SerializationError {
                reason: format!("Invalid footing file {}: {}", path.display(), reason),
            },
            other => other,
        })?;

    input.validate()?;
    Ok(input)
}

/// Parse either an enveloped footing file or a bare input object.
pub fn parse_input(contents: &str) -> CalcResult<FootingInput> {
    let value: serde_json::Value = serde_json::from_str(contents)?;

    if value.get("version").is_some() && value.get("input").is_some() {
        let file: FootingFile = serde_json::from_value(value)?;
        validate_version(&file.version)?;
        Ok(file.input)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x, a newer minor version may contain breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
