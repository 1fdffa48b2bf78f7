//! Federal income tax estimator
//!
//! Gross income less adjustments gives AGI; AGI less the standard or
//! itemized deduction gives taxable income, which runs through the filing
//! status's bracket schedule. Payments already made are netted against the
//! tax to give a refund (positive) or balance owed (negative).

use serde::{Deserialize, Serialize};

use crate::error::TableResult;
use crate::tables::{FilingStatus, TaxYearTable};
use super::brackets::{compute_bracket_tax, BracketTaxLine};
use super::deductions::{choose_deduction, Adjustments, DeductionKind, ItemizedDeductions};

/// One household's tax inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxInputs {
    pub gross_income: f64,
    pub filing_status: FilingStatus,
    pub adjustments: Adjustments,
    /// Itemized deductions, considered only when itemizing is elected
    pub itemized: ItemizedDeductions,
    pub use_itemized: bool,
    pub withholding: f64,
    pub estimated_payments: f64,
}

/// Result of the tax estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub gross_income: f64,
    pub total_adjustments: f64,
    pub adjusted_gross_income: f64,
    pub deduction_kind: DeductionKind,
    pub deductions: f64,
    pub taxable_income: f64,
    pub total_tax: f64,
    /// Tax over gross income
    pub effective_rate: f64,
    pub marginal_rate: f64,
    pub after_tax_income: f64,
    pub total_payments: f64,
    /// Positive: refund. Negative: amount owed.
    pub refund_or_owed: f64,
    pub breakdown: Vec<BracketTaxLine>,
}

/// Estimate tax for `inputs` under `table`
pub fn estimate_tax(inputs: &TaxInputs, table: &TaxYearTable) -> TableResult<TaxResult> {
    let schedule = table.schedule(inputs.filing_status)?;

    let gross_income = inputs.gross_income;
    let total_adjustments = inputs.adjustments.total(table);
    let adjusted_gross_income = gross_income - total_adjustments;

    let itemized = inputs.use_itemized.then_some(&inputs.itemized);
    let deduction = choose_deduction(table, inputs.filing_status, itemized)?;
    let taxable_income = (adjusted_gross_income - deduction.amount).max(0.0);

    let bracket_tax = compute_bracket_tax(taxable_income, schedule);
    let total_tax = bracket_tax.total_tax;

    let effective_rate = if gross_income > 0.0 { total_tax / gross_income } else { 0.0 };
    let total_payments = inputs.withholding + inputs.estimated_payments;

    log::debug!(
        "tax {} {}: gross={:.2} agi={:.2} taxable={:.2} tax={:.2}",
        table.year,
        inputs.filing_status,
        gross_income,
        adjusted_gross_income,
        taxable_income,
        total_tax
    );

    Ok(TaxResult {
        tax_year: table.year,
        filing_status: inputs.filing_status,
        gross_income,
        total_adjustments,
        adjusted_gross_income,
        deduction_kind: deduction.kind,
        deductions: deduction.amount,
        taxable_income,
        total_tax,
        effective_rate,
        marginal_rate: bracket_tax.marginal_rate,
        after_tax_income: gross_income - total_tax,
        total_payments,
        refund_or_owed: total_payments - total_tax,
        breakdown: bracket_tax.breakdown,
    })
}
