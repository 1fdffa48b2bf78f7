//! Period-by-period compound growth engine

use serde::{Deserialize, Serialize};

use crate::rates::{effective_annual_rate, to_periodic_rate, total_periods};
use super::contribution::{ContributionSchedule, ContributionTiming};
use super::snapshot::{GrowthResult, GrowthSnapshot, GrowthYear};
use super::state::GrowthState;

/// Configuration for a growth projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Opening balance
    pub principal: f64,

    /// Nominal annual rate in percent; zero and negative rates are allowed
    pub annual_rate_percent: f64,

    /// Whole years to project
    pub years: u32,

    /// Compounding periods per year
    pub periods_per_year: u32,

    /// Contribution streams, all applied every period they fall due
    #[serde(default)]
    pub contributions: Vec<ContributionSchedule>,

    /// Whether to keep a row for every period
    #[serde(default)]
    pub detailed_output: bool,

    /// Limit withdrawals to the balance on hand, so an exhausted balance stays at zero
    #[serde(default)]
    pub stop_at_depletion: bool,
}

impl GrowthConfig {
    pub fn new(principal: f64, annual_rate_percent: f64, years: u32, periods_per_year: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            years,
            periods_per_year,
            contributions: Vec::new(),
            detailed_output: false,
            stop_at_depletion: false,
        }
    }

    pub fn with_contribution(mut self, schedule: ContributionSchedule) -> Self {
        self.contributions.push(schedule);
        self
    }

    pub fn with_detailed_output(mut self, detailed_output: bool) -> Self {
        self.detailed_output = detailed_output;
        self
    }

    pub fn with_stop_at_depletion(mut self, stop_at_depletion: bool) -> Self {
        self.stop_at_depletion = stop_at_depletion;
        self
    }

    pub fn periodic_rate(&self) -> f64 {
        to_periodic_rate(self.annual_rate_percent, self.periods_per_year)
    }

    pub fn total_periods(&self) -> u32 {
        total_periods(self.years, self.periods_per_year)
    }
}

/// Compound growth engine
pub struct GrowthEngine {
    config: GrowthConfig,
    periodic_rate: f64,
}

impl GrowthEngine {
    pub fn new(config: GrowthConfig) -> Self {
        let periodic_rate = config.periodic_rate();
        Self { config, periodic_rate }
    }

    /// Run the projection to the end of the last year
    pub fn project(&self) -> GrowthResult {
        let config = &self.config;
        let total_periods = config.total_periods();

        log::debug!(
            "growth: principal={:.2} rate={}% periods={} schedules={}",
            config.principal,
            config.annual_rate_percent,
            total_periods,
            config.contributions.len()
        );

        let mut state = GrowthState::opening(config.principal, config.contributions.len());
        let mut periods = if config.detailed_output {
            Vec::with_capacity(total_periods as usize)
        } else {
            Vec::new()
        };
        let mut years = Vec::with_capacity(config.years as usize + 1);
        years.push(GrowthYear {
            year: 0,
            ending_balance: state.balance,
            year_contributions: 0.0,
            year_interest: 0.0,
            cumulative_contributions: state.cumulative_contributions,
            cumulative_interest: 0.0,
        });

        for _period in 1..=total_periods {
            state.advance_period(config.periods_per_year);

            let snapshot = self.calculate_period(&mut state);
            if config.detailed_output {
                periods.push(snapshot);
            }

            if state.is_year_end(config.periods_per_year) {
                years.push(GrowthYear {
                    year: state.year,
                    ending_balance: state.balance,
                    year_contributions: state.year_contributions,
                    year_interest: state.year_interest,
                    cumulative_contributions: state.cumulative_contributions,
                    cumulative_interest: state.cumulative_interest,
                });
            }
        }

        GrowthResult {
            future_value: state.balance,
            total_contributions: state.cumulative_contributions,
            total_interest: state.cumulative_interest,
            effective_annual_rate: effective_annual_rate(self.periodic_rate, config.periods_per_year),
            contributions_by_schedule: state.contributions_by_schedule,
            periods,
            years,
        }
    }

    /// Apply contributions and interest for the current period
    fn calculate_period(&self, state: &mut GrowthState) -> GrowthSnapshot {
        let starting_balance = state.balance;

        let mut contribution = self.apply_contributions(state, ContributionTiming::Beginning);
        let interest_accrued = state.balance * self.periodic_rate;
        state.balance += interest_accrued;
        contribution += self.apply_contributions(state, ContributionTiming::End);

        state.cumulative_contributions += contribution;
        state.cumulative_interest += interest_accrued;
        state.year_contributions += contribution;
        state.year_interest += interest_accrued;

        GrowthSnapshot {
            period_index: state.period_index,
            starting_balance,
            contribution,
            interest_accrued,
            ending_balance: state.balance,
            cumulative_contributions: state.cumulative_contributions,
            cumulative_interest: state.cumulative_interest,
        }
    }

    /// Add every schedule with the given timing that falls due this period
    fn apply_contributions(&self, state: &mut GrowthState, timing: ContributionTiming) -> f64 {
        let mut applied = 0.0;
        for (i, schedule) in self.config.contributions.iter().enumerate() {
            if schedule.timing != timing {
                continue;
            }
            let mut amount = schedule.amount_due(state.period_index, self.config.periods_per_year);
            if self.config.stop_at_depletion {
                amount = amount.max(-state.balance.max(0.0));
            }
            if amount == 0.0 {
                continue;
            }
            state.balance += amount;
            state.contributions_by_schedule[i] += amount;
            applied += amount;
        }
        applied
    }
}
