//! Progressive income tax: bracket arithmetic, deductions and the estimator

mod brackets;
mod deductions;
mod estimator;

pub use brackets::{compute_bracket_tax, format_dollars, BracketRange, BracketTax, BracketTaxLine};
pub use deductions::{choose_deduction, Adjustments, DeductionChoice, DeductionKind, ItemizedDeductions};
pub use estimator::{estimate_tax, TaxInputs, TaxResult};
