//! Tax tables keyed by year

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::{TableError, TableResult};
use super::federal::federal_2024;
use super::loader::{LoadedTables, DEFAULT_TABLES_PATH};
use super::schedule::{BracketSchedule, FilingStatus};

/// Brackets, standard deductions and caps for one tax year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxYearTable {
    pub year: i32,
    pub(crate) schedules: BTreeMap<FilingStatus, BracketSchedule>,
    pub(crate) standard_deductions: BTreeMap<FilingStatus, f64>,
    /// Ceiling on deductible state and local taxes
    pub salt_cap: f64,
    /// Ceiling on the student loan interest adjustment
    pub student_loan_interest_cap: f64,
}

impl TaxYearTable {
    pub fn schedule(&self, status: FilingStatus) -> TableResult<&BracketSchedule> {
        self.schedules.get(&status).ok_or(TableError::MissingEntry {
            year: self.year,
            status,
            field: "bracket schedule",
        })
    }

    pub fn standard_deduction(&self, status: FilingStatus) -> TableResult<f64> {
        self.standard_deductions
            .get(&status)
            .copied()
            .ok_or(TableError::MissingEntry {
                year: self.year,
                status,
                field: "standard deduction",
            })
    }

    /// Filing statuses with a bracket schedule
    pub fn filing_statuses(&self) -> impl Iterator<Item = FilingStatus> + '_ {
        self.schedules.keys().copied()
    }
}

/// Every configured tax year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxTables {
    years: BTreeMap<i32, TaxYearTable>,
}

impl TaxTables {
    /// Tables with the built-in federal years only
    pub fn builtin() -> Self {
        let mut tables = Self { years: BTreeMap::new() };
        tables.insert(federal_2024());
        tables
    }

    /// Load tables from CSV files in the default location (data/tax_tables/)
    pub fn load_default() -> TableResult<Self> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn load_from(path: &Path) -> TableResult<Self> {
        let loaded = LoadedTables::load_from(path)?;
        let tables = Self::from_loaded(loaded)?;
        log::info!(
            "Loaded tax tables for {} year(s) from {}",
            tables.years.len(),
            path.display()
        );
        Ok(tables)
    }

    /// Assemble and validate tables from raw CSV rows
    pub fn from_loaded(loaded: LoadedTables) -> TableResult<Self> {
        let mut raw_schedules: BTreeMap<(i32, FilingStatus), Vec<(f64, Option<f64>, f64)>> = BTreeMap::new();
        for row in &loaded.brackets {
            let status: FilingStatus = row.filing_status.parse()?;
            raw_schedules
                .entry((row.year, status))
                .or_default()
                .push((row.lower_bound, row.upper_bound, row.rate));
        }

        let mut years: BTreeMap<i32, TaxYearTable> = BTreeMap::new();
        for ((year, status), mut rows) in raw_schedules {
            rows.sort_by(|a, b| a.0.total_cmp(&b.0));
            let schedule = BracketSchedule::from_rows(&rows)?;

            let limits = loaded.limits.iter().find(|l| l.year == year);
            let table = years.entry(year).or_insert_with(|| {
                let (salt_cap, student_loan_interest_cap) = match limits {
                    Some(l) => (l.salt_cap, l.student_loan_interest_cap),
                    None => {
                        log::warn!("No limits row for tax year {}; using uncapped deductions", year);
                        (f64::INFINITY, f64::INFINITY)
                    }
                };
                TaxYearTable {
                    year,
                    schedules: BTreeMap::new(),
                    standard_deductions: BTreeMap::new(),
                    salt_cap,
                    student_loan_interest_cap,
                }
            });
            table.schedules.insert(status, schedule);
        }

        for row in &loaded.standard_deductions {
            let status: FilingStatus = row.filing_status.parse()?;
            match years.get_mut(&row.year) {
                Some(table) => {
                    table.standard_deductions.insert(status, row.amount);
                }
                None => log::warn!("Skipping standard deduction for {} {}: no brackets", row.year, status),
            }
        }

        for table in years.values() {
            for status in table.filing_statuses() {
                table.standard_deduction(status)?;
            }
        }

        Ok(Self { years })
    }

    /// Add or replace a year
    pub fn insert(&mut self, table: TaxYearTable) {
        self.years.insert(table.year, table);
    }

    pub fn year(&self, year: i32) -> TableResult<&TaxYearTable> {
        self.years.get(&year).ok_or(TableError::MissingYear(year))
    }

    /// Most recent configured year
    pub fn latest(&self) -> Option<&TaxYearTable> {
        self.years.values().next_back()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::loader::{BracketRecord, LimitsRecord, StandardDeductionRecord};

    fn bracket(year: i32, status: &str, lower: f64, upper: Option<f64>, rate: f64) -> BracketRecord {
        BracketRecord {
            year,
            filing_status: status.to_string(),
            lower_bound: lower,
            upper_bound: upper,
            rate,
        }
    }

    fn deduction(year: i32, status: &str, amount: f64) -> StandardDeductionRecord {
        StandardDeductionRecord {
            year,
            filing_status: status.to_string(),
            amount,
        }
    }

    #[test]
    fn test_builtin_tables() {
        let tables = TaxTables::builtin();
        assert_eq!(tables.years().collect::<Vec<_>>(), vec![2024]);
        assert_eq!(tables.latest().unwrap().year, 2024);
        assert!(matches!(tables.year(2019), Err(TableError::MissingYear(2019))));
    }

    #[test]
    fn test_from_loaded_sorts_and_validates() {
        let loaded = LoadedTables {
            // Out of order on purpose
            brackets: vec![
                bracket(2030, "single", 10_000.0, None, 0.2),
                bracket(2030, "single", 0.0, Some(10_000.0), 0.1),
            ],
            standard_deductions: vec![deduction(2030, "single", 5_000.0), deduction(1999, "single", 1.0)],
            limits: vec![LimitsRecord {
                year: 2030,
                salt_cap: 20_000.0,
                student_loan_interest_cap: 3_000.0,
            }],
        };
        let tables = TaxTables::from_loaded(loaded).unwrap();
        let table = tables.year(2030).unwrap();

        assert_eq!(table.schedule(FilingStatus::Single).unwrap().brackets()[0].marginal_rate, 0.1);
        assert_eq!(table.standard_deduction(FilingStatus::Single).unwrap(), 5_000.0);
        assert_eq!(table.salt_cap, 20_000.0);
        assert!(table.schedule(FilingStatus::MarriedJointly).is_err());
        assert!(tables.year(1999).is_err());
    }

    #[test]
    fn test_from_loaded_errors() {
        let unknown = LoadedTables {
            brackets: vec![bracket(2030, "widowed", 0.0, None, 0.1)],
            standard_deductions: Vec::new(),
            limits: Vec::new(),
        };
        assert!(matches!(
            TaxTables::from_loaded(unknown),
            Err(TableError::UnknownFilingStatus(_))
        ));

        let no_deduction = LoadedTables {
            brackets: vec![bracket(2030, "single", 0.0, None, 0.1)],
            standard_deductions: Vec::new(),
            limits: Vec::new(),
        };
        assert!(matches!(
            TaxTables::from_loaded(no_deduction),
            Err(TableError::MissingEntry { year: 2030, .. })
        ));

        let gap = LoadedTables {
            brackets: vec![
                bracket(2030, "single", 0.0, Some(10_000.0), 0.1),
                bracket(2030, "single", 12_000.0, None, 0.2),
            ],
            standard_deductions: vec![deduction(2030, "single", 5_000.0)],
            limits: Vec::new(),
        };
        assert!(matches!(
            TaxTables::from_loaded(gap),
            Err(TableError::InvalidSchedule { .. })
        ));
    }
}
