//! Compound interest calculator with regular deposits and a frequency comparison

use serde::{Deserialize, Serialize};

use crate::rates::CompoundingFrequency;
use super::contribution::{ContributionSchedule, ContributionTiming};
use super::engine::{GrowthConfig, GrowthEngine};
use super::snapshot::{GrowthSnapshot, GrowthYear};

/// Target number of schedule rows kept for display
pub const MAX_DISPLAY_PERIODS: u32 = 60;

/// Inputs to the compound interest calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestInputs {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
    #[serde(default)]
    pub deposit: f64,
    #[serde(default)]
    pub deposit_frequency: CompoundingFrequency,
    #[serde(default)]
    pub deposit_timing: ContributionTiming,
}

impl CompoundInterestInputs {
    /// Growth configuration for these inputs compounded at `compounding`
    pub fn growth_config(&self, compounding: CompoundingFrequency) -> GrowthConfig {
        let mut config = GrowthConfig::new(
            self.principal,
            self.annual_rate_percent,
            self.years,
            compounding.periods_per_year(),
        );
        if self.deposit != 0.0 {
            config = config.with_contribution(ContributionSchedule::new(
                self.deposit,
                self.deposit_frequency.periods_per_year(),
                self.deposit_timing,
            ));
        }
        config
    }
}

/// Outcome of the same inputs under one compounding frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyComparison {
    pub frequency: CompoundingFrequency,
    pub label: String,
    pub future_value: f64,
    pub total_interest: f64,
}

/// Result of the compound interest calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub future_value: f64,
    pub total_deposits: f64,
    pub total_interest: f64,
    pub effective_rate: f64,
    /// Sampled per-period rows for display
    pub detailed_schedule: Vec<GrowthSnapshot>,
    pub yearly: Vec<GrowthYear>,
    pub comparison: Vec<FrequencyComparison>,
}

/// Run the compound interest calculator
pub fn calculate_compound_interest(inputs: &CompoundInterestInputs) -> CompoundInterestResult {
    let config = inputs.growth_config(inputs.compounding).with_detailed_output(true);
    let result = GrowthEngine::new(config).project();

    CompoundInterestResult {
        future_value: result.future_value,
        total_deposits: result.total_contributions,
        total_interest: result.total_interest,
        effective_rate: result.effective_annual_rate,
        detailed_schedule: sample_schedule(&result.periods, MAX_DISPLAY_PERIODS),
        yearly: result.years,
        comparison: compare_compounding(inputs),
    }
}

/// Project `inputs` under a single compounding frequency
pub fn compare_frequency(inputs: &CompoundInterestInputs, frequency: CompoundingFrequency) -> FrequencyComparison {
    let result = GrowthEngine::new(inputs.growth_config(frequency)).project();
    FrequencyComparison {
        frequency,
        label: frequency.label().to_string(),
        future_value: result.future_value,
        total_interest: result.total_interest,
    }
}

/// Project `inputs` under every compounding frequency
pub fn compare_compounding(inputs: &CompoundInterestInputs) -> Vec<FrequencyComparison> {
    CompoundingFrequency::ALL
        .iter()
        .map(|&frequency| compare_frequency(inputs, frequency))
        .collect()
}

/// Thin a schedule for display: every step-th period, plus the first and last
pub fn sample_schedule(rows: &[GrowthSnapshot], max_points: u32) -> Vec<GrowthSnapshot> {
    let total = rows.len() as u32;
    if total == 0 {
        return Vec::new();
    }
    let display = total.min(max_points.max(1));
    let step = (total / display).max(1);

    rows.iter()
        .filter(|row| row.period_index % step == 0 || row.period_index == 1 || row.period_index == total)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn inputs() -> CompoundInterestInputs {
        CompoundInterestInputs {
            principal: 10_000.0,
            annual_rate_percent: 7.0,
            years: 10,
            compounding: CompoundingFrequency::Monthly,
            deposit: 200.0,
            deposit_frequency: CompoundingFrequency::Monthly,
            deposit_timing: ContributionTiming::Beginning,
        }
    }

    #[test]
    fn test_calculator_summary() {
        let result = calculate_compound_interest(&inputs());

        assert_abs_diff_eq!(result.future_value, 54_915.51, epsilon = 0.01);
        assert_abs_diff_eq!(result.total_deposits, 34_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.future_value, result.total_deposits + result.total_interest, epsilon = 1e-6);
        assert_abs_diff_eq!(result.effective_rate, 0.072290, epsilon = 1e-6);
        assert_eq!(result.yearly.len(), 11);
        assert_eq!(result.comparison.len(), CompoundingFrequency::ALL.len());
    }

    #[test]
    fn test_comparison_orders_by_frequency() {
        let mut no_deposits = inputs();
        no_deposits.deposit = 0.0;
        let comparison = compare_compounding(&no_deposits);

        // More frequent compounding never earns less on a lump sum
        for pair in comparison.windows(2) {
            assert!(pair[0].future_value >= pair[1].future_value);
        }
        assert_eq!(comparison[3].label, "Monthly");
        assert_abs_diff_eq!(comparison[6].future_value, 10_000.0 * 1.07_f64.powi(10), epsilon = 1e-6);
    }

    #[test]
    fn test_sample_schedule() {
        let result = calculate_compound_interest(&inputs());
        let sampled = &result.detailed_schedule;

        // 120 periods thinned to every 2nd period, period 1 added
        assert_eq!(sampled.len(), 61);
        assert_eq!(sampled[0].period_index, 1);
        assert_eq!(sampled.last().unwrap().period_index, 120);
    }

    #[test]
    fn test_short_schedule_kept_whole() {
        let mut short = inputs();
        short.years = 2;
        let result = calculate_compound_interest(&short);
        assert_eq!(result.detailed_schedule.len(), 24);
        assert!(sample_schedule(&[], MAX_DISPLAY_PERIODS).is_empty());
    }

    #[test]
    fn test_daily_compounding_monthly_deposits() {
        let mut daily = inputs();
        daily.compounding = CompoundingFrequency::Daily;
        daily.deposit_timing = ContributionTiming::End;
        let result = calculate_compound_interest(&daily);

        // Twelve deposits a year even though 365 is not a multiple of 12
        assert_abs_diff_eq!(result.total_deposits, 10_000.0 + 120.0 * 200.0, epsilon = 1e-9);
    }
}
