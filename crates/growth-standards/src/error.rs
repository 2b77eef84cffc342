//! Error types for reference table loading and lookup.

use std::path::PathBuf;
use thiserror::Error;

use growth_model::{Gender, MeasurementType, Standard};

/// Errors raised by the reference table store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// No table is registered for the requested combination.
    #[error("no {standard} {measurement} table registered for {gender}")]
    NotFound {
        measurement: MeasurementType,
        gender: Gender,
        standard: Standard,
    },

    /// Reference directory does not exist.
    #[error("reference directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read a reference file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV content.
    #[error("failed to parse CSV {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Invalid value in a CSV field.
    #[error("invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: String,
        value: String,
        file: String,
    },

    /// Header names a band outside the standard's schema.
    #[error("band '{label}' is not part of the {standard} schema in {file}")]
    UnknownBand {
        label: String,
        standard: Standard,
        file: String,
    },

    /// Rows are not strictly increasing in age.
    #[error("rows in {file} are not in increasing age order at age {age}")]
    UnsortedRows { file: String, age: u32 },
}

impl StandardsError {
    /// Returns true for the recoverable "nothing registered" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for reference table operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
