//! Simple loan calculator: closed-form totals plus a short payment preview

use serde::{Deserialize, Serialize};

use super::schedule::AmortizationRow;
use super::terms::{LoanSummary, LoanTerms};

/// Number of payments shown in a loan preview
pub const DEFAULT_PREVIEW_PERIODS: usize = 12;

/// Result of the loan calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCalculation {
    pub terms: LoanTerms,
    pub summary: LoanSummary,

    /// The first few payments of the schedule
    pub preview: Vec<AmortizationRow>,
}

impl LoanCalculation {
    /// Totals come from the closed form; only `preview_periods` rows are generated
    pub fn calculate(terms: LoanTerms, preview_periods: usize) -> Self {
        log::debug!(
            "loan: principal={:.2} rate={}% periods={}",
            terms.principal,
            terms.annual_rate_percent,
            terms.term_periods
        );

        Self {
            terms,
            summary: terms.summary(),
            preview: terms.schedule().take(preview_periods).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_loan_preview() {
        let calc = LoanCalculation::calculate(LoanTerms::monthly(250_000.0, 6.5, 30), DEFAULT_PREVIEW_PERIODS);

        assert_eq!(calc.preview.len(), 12);
        assert_abs_diff_eq!(calc.summary.payment, 1580.17, epsilon = 0.01);
        assert!(calc.preview[11].ending_balance < calc.preview[0].ending_balance);
    }

    #[test]
    fn test_short_loan_preview() {
        let calc = LoanCalculation::calculate(LoanTerms::new(3_000.0, 9.0, 6, 12), DEFAULT_PREVIEW_PERIODS);

        assert_eq!(calc.preview.len(), 6);
        assert_eq!(calc.preview[5].ending_balance, 0.0);
    }

    #[test]
    fn test_empty_loan() {
        let calc = LoanCalculation::calculate(LoanTerms::monthly(0.0, 6.5, 30), DEFAULT_PREVIEW_PERIODS);

        assert!(calc.preview.is_empty());
        assert_eq!(calc.summary.payment, 0.0);
        assert_eq!(calc.summary.total_interest, 0.0);
    }
}
