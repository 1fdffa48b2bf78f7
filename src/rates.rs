//! Rate and period conversion shared by every calculator

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How often interest is compounded (or payments fall) within a year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    Daily,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
    Semiannually,
    Annually,
}

impl CompoundingFrequency {
    /// Every frequency, most frequent first
    pub const ALL: [CompoundingFrequency; 7] = [
        CompoundingFrequency::Daily,
        CompoundingFrequency::Weekly,
        CompoundingFrequency::Biweekly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Semiannually,
        CompoundingFrequency::Annually,
    ];

    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Weekly => 52,
            CompoundingFrequency::Biweekly => 26,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Semiannually => 2,
            CompoundingFrequency::Annually => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompoundingFrequency::Daily => "Daily",
            CompoundingFrequency::Weekly => "Weekly",
            CompoundingFrequency::Biweekly => "Bi-weekly",
            CompoundingFrequency::Monthly => "Monthly",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Semiannually => "Semi-annually",
            CompoundingFrequency::Annually => "Annually",
        }
    }

    /// Parse the lowercase name used on the command line and in JSON
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.label().replace('-', "").eq_ignore_ascii_case(name))
    }
}

impl FromStr for CompoundingFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(&s.replace('-', ""))
            .ok_or_else(|| format!("unknown compounding frequency '{}'", s))
    }
}

/// Convert an annual percentage rate into a rate per period.
///
/// Zero periods per year has no meaningful periodic rate and yields 0.
pub fn to_periodic_rate(annual_rate_percent: f64, periods_per_year: u32) -> f64 {
    if periods_per_year == 0 {
        return 0.0;
    }
    (annual_rate_percent / 100.0) / periods_per_year as f64
}

/// Total number of periods in a term of whole years
pub fn total_periods(years: u32, periods_per_year: u32) -> u32 {
    years.saturating_mul(periods_per_year)
}

/// Growth of one unit over `periods` periods at `rate`, i.e. (1 + rate)^periods.
///
/// Period counts past `i32::MAX` are clamped rather than wrapped.
pub fn growth_factor(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powi(i32::try_from(periods).unwrap_or(i32::MAX))
}

/// Present value of one unit due after `periods` periods at `rate`
pub fn discount_factor(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powi(-i32::try_from(periods).unwrap_or(i32::MAX))
}

/// Annual rate actually earned when `periodic_rate` compounds `periods_per_year` times
pub fn effective_annual_rate(periodic_rate: f64, periods_per_year: u32) -> f64 {
    if periods_per_year == 0 {
        return 0.0;
    }
    growth_factor(periodic_rate, periods_per_year) - 1.0
}
