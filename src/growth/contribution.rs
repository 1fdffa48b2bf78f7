//! Periodic contribution schedules and their alignment to compounding periods

use serde::{Deserialize, Serialize};

use crate::rates::growth_factor;

/// Whether a contribution lands before or after the period's interest accrues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionTiming {
    Beginning,
    #[default]
    End,
}

/// A stream of level contributions that may escalate once a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionSchedule {
    /// Amount of each contribution in the first year
    pub amount: f64,

    /// Contributions per year
    pub frequency_per_year: u32,

    #[serde(default)]
    pub timing: ContributionTiming,

    /// Yearly escalation of the amount, in percent
    #[serde(default)]
    pub annual_increase_percent: f64,
}

impl ContributionSchedule {
    pub fn new(amount: f64, frequency_per_year: u32, timing: ContributionTiming) -> Self {
        Self {
            amount,
            frequency_per_year,
            timing,
            annual_increase_percent: 0.0,
        }
    }

    pub fn monthly(amount: f64, timing: ContributionTiming) -> Self {
        Self::new(amount, 12, timing)
    }

    pub fn with_annual_increase(mut self, annual_increase_percent: f64) -> Self {
        self.annual_increase_percent = annual_increase_percent;
        self
    }

    /// Amount of one contribution after `years_elapsed` full years
    pub fn amount_in_year(&self, years_elapsed: u32) -> f64 {
        if years_elapsed == 0 || self.annual_increase_percent == 0.0 {
            return self.amount;
        }
        self.amount * growth_factor(self.annual_increase_percent / 100.0, years_elapsed)
    }

    /// Number of contributions falling in compounding period `position`
    /// (1..=periods_per_year) of a year.
    ///
    /// Contributions are placed on the nearest period of the grid: the j-th
    /// contribution of the year lands in the period containing j/f of the year
    /// (end timing) or starting it (beginning timing). Each year receives
    /// exactly `frequency_per_year` contributions whatever the ratio between
    /// the two frequencies; when the compounding frequency is a multiple of
    /// the contribution frequency this is one contribution every m/f periods.
    pub fn contributions_due(&self, position: u32, periods_per_year: u32) -> u32 {
        if self.frequency_per_year == 0 || periods_per_year == 0 || position == 0 {
            return 0;
        }
        let f = self.frequency_per_year as u64;
        let m = periods_per_year as u64;
        let q = position.min(periods_per_year) as u64;

        let count = match self.timing {
            ContributionTiming::Beginning => (q * f).div_ceil(m) - ((q - 1) * f).div_ceil(m),
            ContributionTiming::End => (q * f) / m - ((q - 1) * f) / m,
        };
        count as u32
    }

    /// Total contributed by this schedule in projection period `period_index`
    /// (1-indexed across the whole projection)
    pub fn amount_due(&self, period_index: u32, periods_per_year: u32) -> f64 {
        if period_index == 0 || periods_per_year == 0 {
            return 0.0;
        }
        let years_elapsed = (period_index - 1) / periods_per_year;
        let position = (period_index - 1) % periods_per_year + 1;
        let count = self.contributions_due(position, periods_per_year);
        if count == 0 {
            return 0.0;
        }
        self.amount_in_year(years_elapsed) * count as f64
    }
}
