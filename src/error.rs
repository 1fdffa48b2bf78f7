//! Errors raised while loading and validating tax tables.
//!
//! The calculators themselves never fail on numeric input; only table
//! configuration can be wrong.

use std::path::PathBuf;

use thiserror::Error;

use crate::tables::FilingStatus;

/// Result type for table loading and lookups.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur while loading or looking up tax tables.
#[derive(Error, Debug)]
pub enum TableError {
    /// A table file could not be opened.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A table file is not valid CSV or a row has the wrong shape.
    #[error("Malformed table file {path}: {source}")]
    Csv {
        /// File being parsed.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// A filing status name was not recognised.
    #[error("Unknown filing status '{0}'")]
    UnknownFilingStatus(String),

    /// No table is configured for the requested tax year.
    #[error("No tax table for year {0}")]
    MissingYear(i32),

    /// A year is configured but lacks data for a filing status.
    #[error("Tax year {year} has no {field} for {status}")]
    MissingEntry {
        /// Tax year.
        year: i32,
        /// Filing status with missing data.
        status: FilingStatus,
        /// What is missing.
        field: &'static str,
    },

    /// A bracket schedule breaks the schedule rules.
    #[error("Invalid bracket schedule: {reason}")]
    InvalidSchedule {
        /// Which rule was broken.
        reason: String,
    },
}

impl TableError {
    pub(crate) fn invalid_schedule(reason: impl Into<String>) -> Self {
        TableError::InvalidSchedule { reason: reason.into() }
    }
}
