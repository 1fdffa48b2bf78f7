//! CSV-based tax table loader
//!
//! Loads bracket schedules, standard deductions and deduction caps from CSV
//! files in data/tax_tables/

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{TableError, TableResult};

/// Default path to the tax table directory
pub const DEFAULT_TABLES_PATH: &str = "data/tax_tables";

/// Row of brackets.csv; an empty upper bound marks the top bracket
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BracketRecord {
    pub year: i32,
    pub filing_status: String,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

/// Row of standard_deductions.csv
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StandardDeductionRecord {
    pub year: i32,
    pub filing_status: String,
    pub amount: f64,
}

/// Row of limits.csv
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LimitsRecord {
    pub year: i32,
    pub salt_cap: f64,
    pub student_loan_interest_cap: f64,
}

fn read_records<T: DeserializeOwned>(path: &Path) -> TableResult<Vec<T>> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    reader
        .deserialize()
        .map(|row| {
            row.map_err(|source| TableError::Csv {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

/// Load bracket rows from brackets.csv
pub fn load_brackets(path: &Path) -> TableResult<Vec<BracketRecord>> {
    read_records(&path.join("brackets.csv"))
}

/// Load standard deduction rows from standard_deductions.csv
pub fn load_standard_deductions(path: &Path) -> TableResult<Vec<StandardDeductionRecord>> {
    read_records(&path.join("standard_deductions.csv"))
}

/// Load per-year caps from limits.csv
pub fn load_limits(path: &Path) -> TableResult<Vec<LimitsRecord>> {
    read_records(&path.join("limits.csv"))
}

/// Raw rows of every table file in a directory
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTables {
    pub brackets: Vec<BracketRecord>,
    pub standard_deductions: Vec<StandardDeductionRecord>,
    pub limits: Vec<LimitsRecord>,
}

impl LoadedTables {
    /// Load all table files from the default path
    pub fn load_default() -> TableResult<Self> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all table files from a specific path
    pub fn load_from(path: &Path) -> TableResult<Self> {
        Ok(Self {
            brackets: load_brackets(path)?,
            standard_deductions: load_standard_deductions(path)?,
            limits: load_limits(path)?,
        })
    }
}
