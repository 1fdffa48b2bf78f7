//! Mortgage calculator: principal and interest plus escrowed housing costs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::{period_date, yearly_breakdown, AmortizationRow, AmortizationYear};
use super::terms::LoanTerms;

/// Down payment share below which private mortgage insurance is charged
pub const PMI_DOWN_PAYMENT_THRESHOLD: f64 = 0.20;

/// Default annual PMI rate on the loan amount
pub const DEFAULT_PMI_ANNUAL_RATE: f64 = 0.005;

/// Inputs to the mortgage calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInputs {
    pub home_price: f64,
    pub down_payment: f64,
    pub term_years: u32,
    pub annual_rate_percent: f64,
    #[serde(default)]
    pub annual_property_tax: f64,
    #[serde(default)]
    pub annual_home_insurance: f64,
    /// Explicit monthly PMI; when None the default rule applies
    #[serde(default)]
    pub monthly_pmi: Option<f64>,
    #[serde(default)]
    pub monthly_hoa: f64,
    /// Date of the first payment, used to date the schedule
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl MortgageInputs {
    pub fn loan_amount(&self) -> f64 {
        (self.home_price - self.down_payment).max(0.0)
    }

    /// Down payment as a fraction of the home price (0 for a zero price)
    pub fn down_payment_fraction(&self) -> f64 {
        if self.home_price > 0.0 {
            self.down_payment / self.home_price
        } else {
            0.0
        }
    }

    /// Monthly PMI: the explicit figure if given, otherwise 0.5%/yr of the
    /// loan when less than 20% is put down
    pub fn monthly_pmi(&self) -> f64 {
        if let Some(pmi) = self.monthly_pmi {
            return pmi;
        }
        if self.down_payment_fraction() < PMI_DOWN_PAYMENT_THRESHOLD {
            self.loan_amount() * DEFAULT_PMI_ANNUAL_RATE / 12.0
        } else {
            0.0
        }
    }

    pub fn terms(&self) -> LoanTerms {
        LoanTerms::monthly(self.loan_amount(), self.annual_rate_percent, self.term_years)
    }
}

/// Result of the mortgage calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub monthly_principal_interest: f64,
    pub monthly_property_tax: f64,
    pub monthly_insurance: f64,
    pub monthly_pmi: f64,
    pub monthly_hoa: f64,
    pub total_monthly_payment: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub payoff_date: Option<NaiveDate>,
    pub schedule: Vec<AmortizationRow>,
    pub yearly: Vec<AmortizationYear>,
}

/// Run the mortgage calculator
pub fn calculate_mortgage(inputs: &MortgageInputs) -> MortgageResult {
    let terms = inputs.terms();
    let summary = terms.summary();

    log::debug!(
        "mortgage: loan={:.2} rate={}% years={}",
        terms.principal,
        terms.annual_rate_percent,
        inputs.term_years
    );

    let monthly_property_tax = inputs.annual_property_tax / 12.0;
    let monthly_insurance = inputs.annual_home_insurance / 12.0;
    let monthly_pmi = inputs.monthly_pmi();
    let total_monthly_payment =
        summary.payment + monthly_property_tax + monthly_insurance + monthly_pmi + inputs.monthly_hoa;

    let schedule: Vec<AmortizationRow> = match inputs.start_date {
        Some(start) => terms.schedule().dated(start, 12).collect(),
        None => terms.schedule().collect(),
    };
    let yearly = yearly_breakdown(schedule.iter().copied(), 12);

    let payoff_date = match (inputs.start_date, summary.number_of_payments) {
        (Some(start), n) if n > 0 => period_date(start, n - 1, 12),
        _ => None,
    };

    MortgageResult {
        loan_amount: terms.principal,
        monthly_principal_interest: summary.payment,
        monthly_property_tax,
        monthly_insurance,
        monthly_pmi,
        monthly_hoa: inputs.monthly_hoa,
        total_monthly_payment,
        total_interest: summary.total_interest,
        total_paid: terms.principal + summary.total_interest,
        payoff_date,
        schedule,
        yearly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn inputs() -> MortgageInputs {
        MortgageInputs {
            home_price: 500_000.0,
            down_payment: 100_000.0,
            term_years: 30,
            annual_rate_percent: 6.5,
            annual_property_tax: 6_000.0,
            annual_home_insurance: 1_500.0,
            monthly_pmi: None,
            monthly_hoa: 0.0,
            start_date: None,
        }
    }

    #[test]
    fn test_standard_mortgage() {
        let result = calculate_mortgage(&inputs());

        assert_abs_diff_eq!(result.loan_amount, 400_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.monthly_principal_interest, 2528.27, epsilon = 0.01);
        assert_abs_diff_eq!(result.monthly_property_tax, 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.monthly_insurance, 125.0, epsilon = 1e-9);
        assert_eq!(result.monthly_pmi, 0.0);
        assert_abs_diff_eq!(result.total_monthly_payment, 3153.27, epsilon = 0.01);
        assert_eq!(result.schedule.len(), 360);
        assert_eq!(result.yearly.len(), 30);
        assert_abs_diff_eq!(result.total_paid, result.loan_amount + result.total_interest, epsilon = 1e-6);
    }

    #[test]
    fn test_pmi_under_twenty_percent_down() {
        let mut low_down = inputs();
        low_down.down_payment = 50_000.0;
        let result = calculate_mortgage(&low_down);

        // 0.5% of 450,000 spread over 12 months
        assert_abs_diff_eq!(result.monthly_pmi, 187.5, epsilon = 1e-9);

        low_down.monthly_pmi = Some(120.0);
        assert_eq!(calculate_mortgage(&low_down).monthly_pmi, 120.0);
    }

    #[test]
    fn test_payoff_date() {
        let mut dated = inputs();
        dated.start_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        let result = calculate_mortgage(&dated);

        assert_eq!(result.schedule[0].payment_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(result.payoff_date, NaiveDate::from_ymd_opt(2055, 2, 1));
    }

    #[test]
    fn test_paid_in_cash() {
        let mut cash = inputs();
        cash.down_payment = 500_000.0;
        let result = calculate_mortgage(&cash);

        assert_eq!(result.loan_amount, 0.0);
        assert_eq!(result.monthly_principal_interest, 0.0);
        assert!(result.schedule.is_empty());
        assert!(result.yearly.is_empty());
        assert_abs_diff_eq!(result.total_monthly_payment, 625.0, epsilon = 1e-9);
    }
}
