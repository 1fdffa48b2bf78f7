//! Retirement projector
//!
//! Accumulates savings until retirement, checks whether a safe withdrawal
//! from the final balance plus outside income covers the inflation-adjusted
//! income target, back-solves the monthly contribution needed when it does
//! not, and follows the balance through retirement.

use serde::{Deserialize, Serialize};

use crate::annuity::AnnuityCalculator;
use crate::rates::{growth_factor, to_periodic_rate};
use super::contribution::{ContributionSchedule, ContributionTiming};
use super::engine::{GrowthConfig, GrowthEngine};
use super::snapshot::GrowthYear;

/// Default safe withdrawal rate (the 4% rule)
pub const DEFAULT_SAFE_WITHDRAWAL_RATE_PERCENT: f64 = 4.0;

/// Inputs to the retirement projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_income: f64,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    /// Employer match as a percent of the employee contribution
    pub employer_match_percent: f64,
    /// Cap on matched contributions, as a percent of income
    pub employer_match_limit_percent: f64,
    pub return_before_retirement_percent: f64,
    pub return_during_retirement_percent: f64,
    pub inflation_rate_percent: f64,
    /// Desired monthly income in today's money
    pub desired_monthly_income: f64,
    pub social_security_monthly: f64,
    pub pension_monthly: f64,
    pub other_income_monthly: f64,
    pub safe_withdrawal_rate_percent: f64,
    /// Calendar year of the projection start, used to label yearly rows
    pub start_year: Option<i32>,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 65,
            life_expectancy: 85,
            current_income: 75_000.0,
            current_savings: 50_000.0,
            monthly_contribution: 1_000.0,
            employer_match_percent: 50.0,
            employer_match_limit_percent: 6.0,
            return_before_retirement_percent: 7.0,
            return_during_retirement_percent: 4.0,
            inflation_rate_percent: 2.5,
            desired_monthly_income: 5_000.0,
            social_security_monthly: 1_500.0,
            pension_monthly: 0.0,
            other_income_monthly: 0.0,
            safe_withdrawal_rate_percent: DEFAULT_SAFE_WITHDRAWAL_RATE_PERCENT,
            start_year: None,
        }
    }
}

impl RetirementInputs {
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    pub fn years_in_retirement(&self) -> u32 {
        self.life_expectancy.saturating_sub(self.retirement_age)
    }

    /// Monthly employer match: the employee's contribution rate, capped at the
    /// match limit, times the match percent, applied to monthly income
    pub fn monthly_employer_match(&self) -> f64 {
        if self.current_income <= 0.0 {
            return 0.0;
        }
        let employee_rate = (self.monthly_contribution * 12.0) / self.current_income;
        let matched_rate = employee_rate.min(self.employer_match_limit_percent / 100.0).max(0.0);
        (self.current_income / 12.0) * matched_rate * (self.employer_match_percent / 100.0)
    }

    /// Outside income available every month in retirement
    pub fn outside_monthly_income(&self) -> f64 {
        self.social_security_monthly + self.pension_monthly + self.other_income_monthly
    }
}

/// Where retirement income comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncomeSourceKind {
    RetirementSavings,
    SocialSecurity,
    Pension,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub source: IncomeSourceKind,
    pub monthly_amount: f64,
}

/// Year-end position during accumulation or drawdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementYear {
    pub age: u32,
    pub calendar_year: Option<i32>,
    pub balance: f64,
    /// Principal plus all contributions (or minus all withdrawals) so far
    pub contributions: f64,
    /// Investment returns so far
    pub returns: f64,
}

/// Result of the retirement projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementResult {
    pub retirement_balance: f64,
    /// Target monthly income at retirement, in retirement-year money
    pub monthly_income_needed: f64,
    pub monthly_income_from_savings: f64,
    pub total_monthly_income: f64,
    /// Positive: monthly shortfall. Negative: monthly surplus.
    pub shortfall: f64,
    pub on_track: bool,
    pub required_monthly_contribution: f64,
    pub monthly_employer_match: f64,
    /// Current savings plus employee contributions
    pub total_contributions: f64,
    pub total_employer_match: f64,
    pub total_returns: f64,
    pub accumulation: Vec<RetirementYear>,
    pub drawdown: Vec<RetirementYear>,
    /// Age at which savings run out during retirement, if they do
    pub depletion_age: Option<u32>,
    pub income_sources: Vec<IncomeSource>,
}

/// Run the retirement projector
pub fn project_retirement(inputs: &RetirementInputs) -> RetirementResult {
    let years_to_retirement = inputs.years_to_retirement();
    let monthly_employer_match = inputs.monthly_employer_match();

    log::debug!(
        "retirement: age {}->{} savings={:.2} contribution={:.2} match={:.2}",
        inputs.current_age,
        inputs.retirement_age,
        inputs.current_savings,
        inputs.monthly_contribution,
        monthly_employer_match
    );

    let config = GrowthConfig::new(
        inputs.current_savings,
        inputs.return_before_retirement_percent,
        years_to_retirement,
        12,
    )
    .with_contribution(
        ContributionSchedule::monthly(inputs.monthly_contribution, ContributionTiming::Beginning)
            .with_annual_increase(inputs.inflation_rate_percent),
    )
    .with_contribution(ContributionSchedule::monthly(monthly_employer_match, ContributionTiming::Beginning));

    let accumulation = GrowthEngine::new(config).project();
    let retirement_balance = accumulation.future_value;
    let employee_contributions = accumulation.contributions_by_schedule[0];
    let total_employer_match = accumulation.contributions_by_schedule[1];

    // Withdrawal sufficiency at retirement
    let monthly_income_needed =
        inputs.desired_monthly_income * growth_factor(inputs.inflation_rate_percent / 100.0, years_to_retirement);
    let safe_withdrawal_rate = inputs.safe_withdrawal_rate_percent / 100.0;
    let monthly_income_from_savings = retirement_balance * safe_withdrawal_rate / 12.0;
    let total_monthly_income = monthly_income_from_savings + inputs.outside_monthly_income();
    let shortfall = monthly_income_needed - total_monthly_income;

    let required_monthly_contribution = required_contribution(inputs, retirement_balance, shortfall);

    let accumulation_rows = accumulation
        .years
        .iter()
        .map(|y| retirement_year(inputs, inputs.current_age, 0, y))
        .collect();

    let (drawdown, depletion_age) = project_drawdown(inputs, retirement_balance, monthly_income_needed);

    let income_sources = [
        (IncomeSourceKind::RetirementSavings, monthly_income_from_savings),
        (IncomeSourceKind::SocialSecurity, inputs.social_security_monthly),
        (IncomeSourceKind::Pension, inputs.pension_monthly),
        (IncomeSourceKind::Other, inputs.other_income_monthly),
    ]
    .into_iter()
    .filter(|(_, amount)| *amount > 0.0)
    .map(|(source, monthly_amount)| IncomeSource { source, monthly_amount })
    .collect();

    RetirementResult {
        retirement_balance,
        monthly_income_needed,
        monthly_income_from_savings,
        total_monthly_income,
        shortfall,
        on_track: shortfall <= 0.0,
        required_monthly_contribution,
        monthly_employer_match,
        total_contributions: inputs.current_savings + employee_contributions,
        total_employer_match,
        total_returns: accumulation.total_interest,
        accumulation: accumulation_rows,
        drawdown,
        depletion_age,
        income_sources,
    }
}

/// Level beginning-of-month contribution that would close the shortfall.
///
/// The required balance is the projected balance plus the capital a safe
/// withdrawal needs to fund the shortfall. The contribution is solved from
/// the annuity-due future value over the months to retirement. Without a
/// shortfall, a usable withdrawal rate, or any months left, the current
/// contribution stands.
fn required_contribution(inputs: &RetirementInputs, retirement_balance: f64, shortfall: f64) -> f64 {
    let safe_withdrawal_rate = inputs.safe_withdrawal_rate_percent / 100.0;
    if shortfall <= 0.0 || safe_withdrawal_rate <= 0.0 {
        return inputs.monthly_contribution.max(0.0);
    }

    let required_balance = retirement_balance + (shortfall * 12.0) / safe_withdrawal_rate;
    let monthly_rate = to_periodic_rate(inputs.return_before_retirement_percent, 12);
    let months = inputs.years_to_retirement() * 12;

    AnnuityCalculator::payment_for_future_value_due(required_balance, inputs.current_savings, months, monthly_rate)
        .unwrap_or(inputs.monthly_contribution)
        .max(0.0)
}

/// Follow the retirement balance to life expectancy, withdrawing each month
/// whatever part of the (inflating) income target outside income does not cover.
/// Once the balance runs out it stays at zero.
fn project_drawdown(
    inputs: &RetirementInputs,
    retirement_balance: f64,
    monthly_income_needed: f64,
) -> (Vec<RetirementYear>, Option<u32>) {
    let monthly_withdrawal = (monthly_income_needed - inputs.outside_monthly_income()).max(0.0);

    let mut config = GrowthConfig::new(
        retirement_balance,
        inputs.return_during_retirement_percent,
        inputs.years_in_retirement(),
        12,
    )
    .with_stop_at_depletion(true);
    if monthly_withdrawal > 0.0 {
        config = config.with_contribution(
            ContributionSchedule::monthly(-monthly_withdrawal, ContributionTiming::Beginning)
                .with_annual_increase(inputs.inflation_rate_percent),
        );
    }

    let result = GrowthEngine::new(config).project();
    let offset = inputs.years_to_retirement();
    let rows: Vec<RetirementYear> = result
        .years
        .iter()
        .map(|y| retirement_year(inputs, inputs.retirement_age, offset, y))
        .collect();

    let depletion_age = rows.iter().find(|row| row.balance <= 0.0).map(|row| row.age);
    if let Some(age) = depletion_age {
        log::debug!("retirement: savings depleted at age {}", age);
    }

    (rows, depletion_age)
}

fn retirement_year(inputs: &RetirementInputs, base_age: u32, year_offset: u32, year: &GrowthYear) -> RetirementYear {
    RetirementYear {
        age: base_age + year.year,
        calendar_year: inputs.start_year.map(|start| start + (year_offset + year.year) as i32),
        balance: year.ending_balance,
        contributions: year.cumulative_contributions,
        returns: year.cumulative_interest,
    }
}
