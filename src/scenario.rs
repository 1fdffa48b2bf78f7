//! Scenario runner for batch calculations
//!
//! Loads tax tables once, then runs many households or growth configurations
//! against them in parallel without re-reading CSV files.

use std::path::Path;

use rayon::prelude::*;

use crate::error::TableResult;
use crate::growth::{compare_frequency, CompoundInterestInputs, FrequencyComparison, GrowthConfig, GrowthEngine, GrowthResult};
use crate::rates::CompoundingFrequency;
use crate::tables::TaxTables;
use crate::tax::{estimate_tax, TaxInputs, TaxResult};

/// Pre-loaded scenario runner for batch calculations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// let results = runner.run_tax_batch(&households, 2024)?;
/// for result in &results {
///     println!("{}: {:.2}", result.filing_status, result.total_tax);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    tables: TaxTables,
}

impl ScenarioRunner {
    /// Create runner with the built-in tax tables
    pub fn new() -> Self {
        Self {
            tables: TaxTables::builtin(),
        }
    }

    /// Create runner by loading tax tables from CSV files
    pub fn from_csv() -> TableResult<Self> {
        Ok(Self {
            tables: TaxTables::load_default()?,
        })
    }

    /// Create runner from a specific tax table directory
    pub fn from_csv_path(path: &Path) -> TableResult<Self> {
        Ok(Self {
            tables: TaxTables::load_from(path)?,
        })
    }

    pub fn with_tables(tables: TaxTables) -> Self {
        Self { tables }
    }

    /// Estimate tax for one household
    pub fn run_tax(&self, inputs: &TaxInputs, year: i32) -> TableResult<TaxResult> {
        estimate_tax(inputs, self.tables.year(year)?)
    }

    /// Estimate tax for many households under the same year, in input order
    pub fn run_tax_batch(&self, households: &[TaxInputs], year: i32) -> TableResult<Vec<TaxResult>> {
        let table = self.tables.year(year)?;
        log::debug!("Running {} households against {} tables", households.len(), year);
        households.par_iter().map(|inputs| estimate_tax(inputs, table)).collect()
    }

    /// Project `inputs` under every compounding frequency, one thread per frequency
    pub fn compare_compounding(&self, inputs: &CompoundInterestInputs) -> Vec<FrequencyComparison> {
        CompoundingFrequency::ALL
            .par_iter()
            .map(|&frequency| compare_frequency(inputs, frequency))
            .collect()
    }

    /// Run independent growth projections, in input order
    pub fn run_growth_batch(&self, configs: &[GrowthConfig]) -> Vec<GrowthResult> {
        configs
            .par_iter()
            .map(|config| GrowthEngine::new(config.clone()).project())
            .collect()
    }

    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::growth::{compare_compounding, ContributionTiming};
    use crate::tables::FilingStatus;

    #[test]
    fn test_tax_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let households: Vec<TaxInputs> = (1..=50)
            .map(|i| TaxInputs {
                gross_income: i as f64 * 5_000.0,
                filing_status: FilingStatus::ALL[i % 4],
                ..TaxInputs::default()
            })
            .collect();

        let results = runner.run_tax_batch(&households, 2024).unwrap();
        assert_eq!(results.len(), 50);
        for (inputs, result) in households.iter().zip(&results) {
            assert_eq!(result.gross_income, inputs.gross_income);
            assert_eq!(result, &runner.run_tax(inputs, 2024).unwrap());
        }
    }

    #[test]
    fn test_unknown_year() {
        let runner = ScenarioRunner::new();
        let err = runner.run_tax_batch(&[TaxInputs::default()], 2001).unwrap_err();
        assert!(matches!(err, TableError::MissingYear(2001)));
    }

    #[test]
    fn test_parallel_comparison_matches_sequential() {
        let inputs = CompoundInterestInputs {
            principal: 5_000.0,
            annual_rate_percent: 6.0,
            years: 15,
            compounding: CompoundingFrequency::Monthly,
            deposit: 100.0,
            deposit_frequency: CompoundingFrequency::Monthly,
            deposit_timing: ContributionTiming::End,
        };
        let runner = ScenarioRunner::new();
        assert_eq!(runner.compare_compounding(&inputs), compare_compounding(&inputs));
    }

    #[test]
    fn test_growth_batch() {
        let runner = ScenarioRunner::default();
        let configs: Vec<_> = [3.0, 5.0, 7.0]
            .iter()
            .map(|&rate| GrowthConfig::new(10_000.0, rate, 20, 12))
            .collect();

        let results = runner.run_growth_batch(&configs);
        assert_eq!(results.len(), 3);

        // Higher rate should result in a higher future value
        assert!(results[2].future_value > results[1].future_value);
        assert!(results[1].future_value > results[0].future_value);
    }
}
