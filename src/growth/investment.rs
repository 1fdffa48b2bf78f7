//! Investment projector: lump sum plus escalating monthly contributions

use serde::{Deserialize, Serialize};

use crate::rates::{growth_factor, CompoundingFrequency};
use super::contribution::{ContributionSchedule, ContributionTiming};
use super::engine::{GrowthConfig, GrowthEngine};
use super::snapshot::GrowthSnapshot;

/// Years of per-period detail kept in an investment result
pub const DETAIL_YEARS: u32 = 5;

/// Preset expected returns by risk appetite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
    VeryAggressive,
}

impl RiskProfile {
    /// Expected annual return in percent
    pub fn expected_return_percent(self) -> f64 {
        match self {
            RiskProfile::Conservative => 5.0,
            RiskProfile::Moderate => 8.0,
            RiskProfile::Aggressive => 11.0,
            RiskProfile::VeryAggressive => 14.0,
        }
    }

    /// Annual volatility in percent, informational only
    pub fn volatility_percent(self) -> f64 {
        match self {
            RiskProfile::Conservative => 5.0,
            RiskProfile::Moderate => 12.0,
            RiskProfile::Aggressive => 20.0,
            RiskProfile::VeryAggressive => 30.0,
        }
    }
}

/// Inputs to the investment projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInputs {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub annual_return_percent: f64,
    pub years: u32,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
    #[serde(default)]
    pub inflation_rate_percent: f64,
    /// Tax rate applied to investment returns when computing the after-tax value
    #[serde(default)]
    pub tax_rate_percent: f64,
    /// Yearly raise applied to the monthly contribution
    #[serde(default)]
    pub contribution_increase_percent: f64,
}

impl InvestmentInputs {
    /// Inputs using a risk profile's expected return
    pub fn with_risk_profile(mut self, profile: RiskProfile) -> Self {
        self.annual_return_percent = profile.expected_return_percent();
        self
    }
}

/// Year-end investment position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentYear {
    pub year: u32,
    pub balance: f64,
    /// Cumulative contributions including the initial investment
    pub contributions: f64,
    /// Returns earned during this year
    pub returns: f64,
    /// Balance in today's money
    pub inflation_adjusted: f64,
}

/// Result of the investment projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_returns: f64,
    pub inflation_adjusted_value: f64,
    pub after_tax_value: f64,
    /// Compound annual growth of the initial investment into the future value
    pub effective_annual_return: f64,
    pub yearly: Vec<InvestmentYear>,
    /// Per-period rows for the first few years
    pub early_periods: Vec<GrowthSnapshot>,
}

/// Deflate `value` by `years` of inflation
fn inflation_adjusted(value: f64, inflation_rate_percent: f64, years: u32) -> f64 {
    let deflator = growth_factor(inflation_rate_percent / 100.0, years);
    if deflator == 0.0 {
        return value;
    }
    value / deflator
}

/// Run the investment projector
pub fn project_investment(inputs: &InvestmentInputs) -> InvestmentResult {
    let periods_per_year = inputs.compounding.periods_per_year();
    let config = GrowthConfig::new(
        inputs.initial_investment,
        inputs.annual_return_percent,
        inputs.years,
        periods_per_year,
    )
    .with_contribution(
        ContributionSchedule::monthly(inputs.monthly_contribution, ContributionTiming::End)
            .with_annual_increase(inputs.contribution_increase_percent),
    )
    .with_detailed_output(true);

    let mut result = GrowthEngine::new(config).project();

    let detail_periods = (DETAIL_YEARS * periods_per_year) as usize;
    result.periods.truncate(detail_periods);

    let yearly = result
        .years
        .iter()
        .skip(1)
        .map(|y| InvestmentYear {
            year: y.year,
            balance: y.ending_balance,
            contributions: y.cumulative_contributions,
            returns: y.year_interest,
            inflation_adjusted: inflation_adjusted(y.ending_balance, inputs.inflation_rate_percent, y.year),
        })
        .collect();

    let future_value = result.future_value;
    let tax_rate = inputs.tax_rate_percent / 100.0;
    let effective_annual_return = if inputs.initial_investment > 0.0 && inputs.years > 0 {
        (future_value / inputs.initial_investment).powf(1.0 / inputs.years as f64) - 1.0
    } else {
        0.0
    };

    InvestmentResult {
        future_value,
        total_contributions: result.total_contributions,
        total_returns: result.total_interest,
        inflation_adjusted_value: inflation_adjusted(future_value, inputs.inflation_rate_percent, inputs.years),
        after_tax_value: result.total_contributions + result.total_interest * (1.0 - tax_rate),
        effective_annual_return,
        yearly,
        early_periods: result.periods,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn inputs() -> InvestmentInputs {
        InvestmentInputs {
            initial_investment: 10_000.0,
            monthly_contribution: 500.0,
            annual_return_percent: 8.0,
            years: 20,
            compounding: CompoundingFrequency::Monthly,
            inflation_rate_percent: 2.5,
            tax_rate_percent: 25.0,
            contribution_increase_percent: 3.0,
        }
    }

    #[test]
    fn test_projection_totals() {
        let result = project_investment(&inputs());

        assert_eq!(result.yearly.len(), 20);
        assert_eq!(result.early_periods.len(), 60);

        // Contributions: 6000/yr escalating 3% for 20 years, plus the lump sum
        let expected_contributions = 10_000.0 + 6_000.0 * (1.03_f64.powi(20) - 1.0) / 0.03;
        assert_abs_diff_eq!(result.total_contributions, expected_contributions, epsilon = 1e-6);
        assert_abs_diff_eq!(
            result.future_value,
            result.total_contributions + result.total_returns,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            result.inflation_adjusted_value,
            result.future_value / 1.025_f64.powi(20),
            max_relative = 1e-12
        );
        assert_abs_diff_eq!(
            result.after_tax_value,
            result.future_value - 0.25 * result.total_returns,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_yearly_returns_sum() {
        let result = project_investment(&inputs());
        let returns: f64 = result.yearly.iter().map(|y| y.returns).sum();
        assert_abs_diff_eq!(returns, result.total_returns, epsilon = 1e-6);
        assert_eq!(result.yearly.last().unwrap().balance, result.future_value);
    }

    #[test]
    fn test_lump_sum_cagr() {
        let mut lump = inputs();
        lump.monthly_contribution = 0.0;
        lump.compounding = CompoundingFrequency::Annually;
        let result = project_investment(&lump);

        assert_abs_diff_eq!(result.effective_annual_return, 0.08, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut nothing = inputs();
        nothing.initial_investment = 0.0;
        nothing.years = 0;
        let result = project_investment(&nothing);

        assert_eq!(result.future_value, 0.0);
        assert_eq!(result.effective_annual_return, 0.0);
        assert!(result.yearly.is_empty());
        assert!(result.early_periods.is_empty());
    }

    #[test]
    fn test_risk_profile_return() {
        let aggressive = inputs().with_risk_profile(RiskProfile::Aggressive);
        assert_eq!(aggressive.annual_return_percent, 11.0);
        assert!(project_investment(&aggressive).future_value > project_investment(&inputs()).future_value);
    }

    #[test]
    fn test_riskier_profiles_are_more_volatile() {
        let profiles = [
            RiskProfile::Conservative,
            RiskProfile::Moderate,
            RiskProfile::Aggressive,
            RiskProfile::VeryAggressive,
        ];
        for pair in profiles.windows(2) {
            assert!(pair[1].expected_return_percent() > pair[0].expected_return_percent());
            assert!(pair[1].volatility_percent() > pair[0].volatility_percent());
        }
        assert_eq!(RiskProfile::Moderate.volatility_percent(), 12.0);
    }
}
