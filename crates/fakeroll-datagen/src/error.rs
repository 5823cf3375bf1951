//! Error types.

use crate::locale::Locale;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while generating one record. The pager logs and skips the index.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// A locale table needed for a field has no entries.
    #[error("Locale {locale} has an empty '{table}' table")]
    EmptyTable { locale: Locale, table: &'static str },
}

impl GenerationError {
    pub fn empty_table(locale: Locale, table: &'static str) -> Self {
        Self::EmptyTable { locale, table }
    }
}

/// Malformed request parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: &'static str },

    #[error("Parameter '{name}' must be a number, got '{value}'")]
    NotANumber { name: &'static str, value: String },

    #[error("Parameter '{name}' is out of range: {reason}")]
    OutOfRange { name: &'static str, reason: String },
}

impl RequestError {
    pub fn missing(name: &'static str) -> Self {
        Self::MissingParameter { name }
    }

    pub fn not_a_number(name: &'static str, value: impl Into<String>) -> Self {
        Self::NotANumber {
            name,
            value: value.into(),
        }
    }

    pub fn out_of_range(name: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            name,
            reason: reason.into(),
        }
    }
}

/// Failure to load a locale override file.
#[derive(Error, Debug)]
pub enum LocaleFileError {
    #[error("Failed to read locale file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse locale file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
