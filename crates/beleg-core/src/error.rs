//! Error types for the beleg-core library.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the beleg library.
#[derive(Error, Debug)]
pub enum BelegError {
    /// Field extraction failed on a mandatory field.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// The three fields every draft record must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatoryField {
    Vendor,
    Amount,
    Date,
}

impl MandatoryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MandatoryField::Vendor => "vendor",
            MandatoryField::Amount => "amount",
            MandatoryField::Date => "date",
        }
    }
}

impl fmt::Display for MandatoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors related to receipt field extraction.
///
/// Only the mandatory fields can fail an extraction; every other gap is
/// defaulted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No extraction strategy produced a value for a mandatory field.
    #[error("missing required field: {field}")]
    MissingField { field: MandatoryField },
}

impl ExtractionError {
    pub fn missing(field: MandatoryField) -> Self {
        Self::MissingField { field }
    }

    /// The field that could not be extracted.
    pub fn field(&self) -> MandatoryField {
        match self {
            ExtractionError::MissingField { field } => *field,
        }
    }
}

/// Result type for the beleg library.
pub type Result<T> = std::result::Result<T, BelegError>;
