//! Fixed-payment amortization: loan terms, lazy schedules, loan and mortgage calculators

mod terms;
mod schedule;
mod loan;
mod mortgage;

pub use terms::{fixed_payment, LoanSummary, LoanTerms};
pub use schedule::{period_date, yearly_breakdown, AmortizationRow, AmortizationSchedule, AmortizationYear};
pub use loan::{LoanCalculation, DEFAULT_PREVIEW_PERIODS};
pub use mortgage::{calculate_mortgage, MortgageInputs, MortgageResult, DEFAULT_PMI_ANNUAL_RATE};
