//! Output structures for growth projections

use serde::{Deserialize, Serialize};

/// Balance movement over one compounding period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSnapshot {
    pub period_index: u32,
    pub starting_balance: f64,
    /// Everything contributed this period, before and after interest
    pub contribution: f64,
    pub interest_accrued: f64,
    pub ending_balance: f64,
    pub cumulative_contributions: f64,
    pub cumulative_interest: f64,
}

/// Balance at the end of a projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthYear {
    /// Year number; year 0 is the opening balance
    pub year: u32,
    pub ending_balance: f64,
    pub year_contributions: f64,
    pub year_interest: f64,
    pub cumulative_contributions: f64,
    pub cumulative_interest: f64,
}

/// Complete growth projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    pub future_value: f64,

    /// Principal plus all contributions
    pub total_contributions: f64,

    pub total_interest: f64,

    /// (1 + periodic rate)^periods_per_year - 1
    pub effective_annual_rate: f64,

    /// Contributions per schedule, in the order the schedules were configured
    pub contributions_by_schedule: Vec<f64>,

    /// Per-period rows, only populated for detailed projections
    pub periods: Vec<GrowthSnapshot>,

    /// Year-end rows, starting with the year-0 opening balance
    pub years: Vec<GrowthYear>,
}

impl GrowthResult {
    /// Number of projection years, not counting the opening point
    pub fn total_years(&self) -> u32 {
        self.years.len().saturating_sub(1) as u32
    }

    /// Growth over contributions as a share of contributions (0 when nothing was contributed)
    pub fn return_on_contributions(&self) -> f64 {
        if self.total_contributions <= 0.0 {
            0.0
        } else {
            self.total_interest / self.total_contributions
        }
    }
}
