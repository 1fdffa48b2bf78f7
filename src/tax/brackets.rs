//! Progressive bracket tax

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tables::{BracketSchedule, TaxBracket};

/// Dollar range of a bracket, shown as "$11,600 - $47,150" or "$609,350 - above"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketRange {
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
}

impl From<&TaxBracket> for BracketRange {
    fn from(bracket: &TaxBracket) -> Self {
        Self {
            lower_bound: bracket.lower_bound,
            upper_bound: bracket.upper_bound,
        }
    }
}

impl fmt::Display for BracketRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper_bound {
            Some(upper) => write!(f, "{} - {}", format_dollars(self.lower_bound), format_dollars(upper)),
            None => write!(f, "{} - above", format_dollars(self.lower_bound)),
        }
    }
}

/// Whole dollars with thousands separators
pub fn format_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Tax attributed to one bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketTaxLine {
    pub range: BracketRange,
    pub income: f64,
    pub tax: f64,
    pub rate: f64,
}

/// Tax on a taxable amount under a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketTax {
    pub taxable_income: f64,
    pub total_tax: f64,
    /// Rate of the highest bracket reached, 0 when nothing is taxable
    pub marginal_rate: f64,
    /// Brackets holding a positive share of the income, ascending
    pub breakdown: Vec<BracketTaxLine>,
}

/// Apply `schedule` to `taxable_income`
pub fn compute_bracket_tax(taxable_income: f64, schedule: &BracketSchedule) -> BracketTax {
    let mut total_tax = 0.0;
    let mut marginal_rate = 0.0;
    let mut breakdown = Vec::new();

    for bracket in schedule.brackets() {
        if taxable_income <= bracket.lower_bound {
            break;
        }
        let income = bracket.income_in_bracket(taxable_income);
        let tax = income * bracket.marginal_rate;
        total_tax += tax;
        marginal_rate = bracket.marginal_rate;
        breakdown.push(BracketTaxLine {
            range: BracketRange::from(bracket),
            income,
            tax,
            rate: bracket.marginal_rate,
        });
    }

    BracketTax {
        taxable_income,
        total_tax,
        marginal_rate,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{federal_2024, FilingStatus};
    use approx::assert_abs_diff_eq;

    fn single() -> BracketSchedule {
        federal_2024().schedule(FilingStatus::Single).unwrap().clone()
    }

    #[test]
    fn test_zero_and_negative_income() {
        let schedule = single();
        let zero = compute_bracket_tax(0.0, &schedule);
        assert_eq!(zero.total_tax, 0.0);
        assert_eq!(zero.marginal_rate, 0.0);
        assert!(zero.breakdown.is_empty());
        assert_eq!(compute_bracket_tax(-500.0, &schedule).total_tax, 0.0);
    }

    #[test]
    fn test_single_filer_60k() {
        let tax = compute_bracket_tax(60_000.0, &single());

        // 10% of 11,600 + 12% of 35,550 + 22% of 12,850
        assert_abs_diff_eq!(tax.total_tax, 8_253.0, epsilon = 1e-6);
        assert_eq!(tax.marginal_rate, 0.22);
        assert_eq!(tax.breakdown.len(), 3);
        assert_abs_diff_eq!(tax.breakdown[2].income, 12_850.0, epsilon = 1e-9);
        assert_eq!(tax.breakdown[1].range.to_string(), "$11,600 - $47,150");
    }

    #[test]
    fn test_top_bracket() {
        let schedule = single();
        let tax = compute_bracket_tax(1_000_000.0, &schedule);

        assert_eq!(tax.marginal_rate, 0.37);
        assert_eq!(tax.breakdown.len(), 7);
        assert_eq!(tax.breakdown[6].range.to_string(), "$609,350 - above");
        let expected = schedule.base_tax(6) + (1_000_000.0 - 609_350.0) * 0.37;
        assert_abs_diff_eq!(tax.total_tax, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_continuous_at_boundaries() {
        let schedule = single();
        for (i, bracket) in schedule.brackets().iter().enumerate().skip(1) {
            let at = compute_bracket_tax(bracket.lower_bound, &schedule).total_tax;
            let below = compute_bracket_tax(bracket.lower_bound - 0.01, &schedule).total_tax;
            let above = compute_bracket_tax(bracket.lower_bound + 0.01, &schedule).total_tax;

            assert_abs_diff_eq!(at, schedule.base_tax(i), epsilon = 1e-6);
            assert!(at - below <= 0.01 + 1e-9);
            assert!(above - at <= 0.01 + 1e-9);
        }
    }

    #[test]
    fn test_non_decreasing() {
        for status in FilingStatus::ALL {
            let table = federal_2024();
            let schedule = table.schedule(status).unwrap();
            let mut previous = 0.0;
            for step in 0..=1_000 {
                let tax = compute_bracket_tax(step as f64 * 1_000.0, schedule).total_tax;
                assert!(tax >= previous);
                previous = tax;
            }
        }
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0.0), "$0");
        assert_eq!(format_dollars(999.4), "$999");
        assert_eq!(format_dollars(1_000.0), "$1,000");
        assert_eq!(format_dollars(1_234_567.0), "$1,234,567");
        assert_eq!(format_dollars(-2_500.0), "-$2,500");
    }
}
