//! Loan terms, the fixed-payment formula and closed-form loan totals

use serde::{Deserialize, Serialize};

use crate::rates::{growth_factor, to_periodic_rate, total_periods};
use super::schedule::AmortizationSchedule;

/// Terms of a fixed-payment loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual interest rate in percent (6.5 = 6.5%)
    pub annual_rate_percent: f64,

    /// Number of payments over the life of the loan
    pub term_periods: u32,

    /// Payments (and compounding periods) per year
    pub periods_per_year: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_periods: u32, periods_per_year: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_periods,
            periods_per_year,
        }
    }

    /// Monthly-payment loan over whole years
    pub fn monthly(principal: f64, annual_rate_percent: f64, years: u32) -> Self {
        Self::new(principal, annual_rate_percent, total_periods(years, 12), 12)
    }

    pub fn periodic_rate(&self) -> f64 {
        to_periodic_rate(self.annual_rate_percent, self.periods_per_year)
    }

    /// Level payment per period
    pub fn payment(&self) -> f64 {
        fixed_payment(self.principal, self.periodic_rate(), self.term_periods)
    }

    /// Lazy schedule of every payment; take a prefix with `.take(k)`
    pub fn schedule(&self) -> AmortizationSchedule {
        AmortizationSchedule::new(self.principal, self.periodic_rate(), self.term_periods)
    }

    /// Closed-form totals, computed without walking the schedule
    pub fn summary(&self) -> LoanSummary {
        let payment = self.payment();
        let number_of_payments = if payment > 0.0 { self.term_periods } else { 0 };
        let total_payment = payment * number_of_payments as f64;
        let total_interest = if number_of_payments > 0 {
            total_payment - self.principal
        } else {
            0.0
        };

        LoanSummary {
            payment,
            number_of_payments,
            total_payment,
            total_interest,
        }
    }
}

/// Closed-form summary of a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub payment: f64,
    pub number_of_payments: u32,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// Fixed payment that retires `principal` over `periods` at `periodic_rate`.
///
/// A zero rate amortizes linearly. Non-positive principal or zero periods mean
/// there is nothing to amortize and the payment is 0.
pub fn fixed_payment(principal: f64, periodic_rate: f64, periods: u32) -> f64 {
    if principal <= 0.0 || periods == 0 {
        return 0.0;
    }
    if periodic_rate == 0.0 {
        return principal / periods as f64;
    }

    let growth = growth_factor(periodic_rate, periods);
    if growth.is_infinite() {
        // Term so long that the payment only covers interest
        return principal * periodic_rate;
    }
    let denominator = growth - 1.0;
    if denominator == 0.0 {
        return principal / periods as f64;
    }
    principal * periodic_rate * growth / denominator
}
