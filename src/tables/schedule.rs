//! Filing statuses and progressive bracket schedules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};

/// Federal filing status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedJointly,
    MarriedSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        FilingStatus::Single,
        FilingStatus::MarriedJointly,
        FilingStatus::MarriedSeparately,
        FilingStatus::HeadOfHousehold,
    ];

    /// Name used in table files
    pub fn code(self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedJointly => "marriedJointly",
            FilingStatus::MarriedSeparately => "marriedSeparately",
            FilingStatus::HeadOfHousehold => "headOfHousehold",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedJointly => "married filing jointly",
            FilingStatus::MarriedSeparately => "married filing separately",
            FilingStatus::HeadOfHousehold => "head of household",
        };
        f.write_str(label)
    }
}

impl FromStr for FilingStatus {
    type Err = TableError;

    /// Accepts the table-file codes plus common spellings ("married-jointly", "mfj", "hoh")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "single" | "s" => Ok(FilingStatus::Single),
            "marriedjointly" | "marriedfilingjointly" | "mfj" => Ok(FilingStatus::MarriedJointly),
            "marriedseparately" | "marriedfilingseparately" | "mfs" => Ok(FilingStatus::MarriedSeparately),
            "headofhousehold" | "hoh" => Ok(FilingStatus::HeadOfHousehold),
            _ => Err(TableError::UnknownFilingStatus(s.to_string())),
        }
    }
}

/// One bracket of a progressive schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: f64,
    /// None for the top bracket
    pub upper_bound: Option<f64>,
    /// Marginal rate as a fraction
    pub marginal_rate: f64,
}

impl TaxBracket {
    pub fn new(lower_bound: f64, upper_bound: Option<f64>, marginal_rate: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            marginal_rate,
        }
    }

    /// Width of the bracket, infinite for the top one
    pub fn width(&self) -> f64 {
        self.upper_bound.map_or(f64::INFINITY, |upper| upper - self.lower_bound)
    }

    /// Portion of `taxable` that falls in this bracket
    pub fn income_in_bracket(&self, taxable: f64) -> f64 {
        let top = self.upper_bound.map_or(taxable, |upper| taxable.min(upper));
        (top - self.lower_bound).max(0.0)
    }
}

/// Validated, ascending bracket schedule.
///
/// Brackets start at zero, are contiguous, have strictly increasing rates
/// in [0, 1], and only the last one is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    pub fn new(brackets: Vec<TaxBracket>) -> TableResult<Self> {
        let Some(first) = brackets.first() else {
            return Err(TableError::invalid_schedule("schedule has no brackets"));
        };
        if first.lower_bound != 0.0 {
            return Err(TableError::invalid_schedule(format!(
                "first bracket starts at {} instead of 0",
                first.lower_bound
            )));
        }

        let last = brackets.len() - 1;
        for (i, bracket) in brackets.iter().enumerate() {
            if !(0.0..=1.0).contains(&bracket.marginal_rate) {
                return Err(TableError::invalid_schedule(format!(
                    "rate {} is outside [0, 1]",
                    bracket.marginal_rate
                )));
            }
            match bracket.upper_bound {
                None if i != last => {
                    return Err(TableError::invalid_schedule(format!(
                        "bracket starting at {} is unbounded but not last",
                        bracket.lower_bound
                    )));
                }
                Some(upper) if i == last => {
                    return Err(TableError::invalid_schedule(format!("top bracket is capped at {}", upper)));
                }
                Some(upper) if upper <= bracket.lower_bound => {
                    return Err(TableError::invalid_schedule(format!(
                        "bracket [{}, {}] is empty",
                        bracket.lower_bound, upper
                    )));
                }
                _ => {}
            }
        }

        for pair in brackets.windows(2) {
            if pair[0].upper_bound != Some(pair[1].lower_bound) {
                return Err(TableError::invalid_schedule(format!(
                    "gap or overlap at {}",
                    pair[1].lower_bound
                )));
            }
            if pair[1].marginal_rate <= pair[0].marginal_rate {
                return Err(TableError::invalid_schedule(format!(
                    "rate {} does not increase over {}",
                    pair[1].marginal_rate, pair[0].marginal_rate
                )));
            }
        }

        Ok(Self { brackets })
    }

    /// Build a schedule from (lower, upper, rate) rows
    pub fn from_rows(rows: &[(f64, Option<f64>, f64)]) -> TableResult<Self> {
        Self::new(
            rows.iter()
                .map(|&(lower, upper, rate)| TaxBracket::new(lower, upper, rate))
                .collect(),
        )
    }

    /// Schedule from rows already known to be well formed
    pub(crate) fn from_trusted_rows(rows: &[(f64, Option<f64>, f64)]) -> Self {
        Self {
            brackets: rows
                .iter()
                .map(|&(lower, upper, rate)| TaxBracket::new(lower, upper, rate))
                .collect(),
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Tax owed on all income below the start of bracket `index`
    pub fn base_tax(&self, index: usize) -> f64 {
        self.brackets
            .iter()
            .take(index)
            .map(|b| b.width() * b.marginal_rate)
            .sum()
    }

    pub fn top_rate(&self) -> f64 {
        self.brackets.last().map_or(0.0, |b| b.marginal_rate)
    }
}
