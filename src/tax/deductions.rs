//! Above-the-line adjustments and below-the-line deductions

use serde::{Deserialize, Serialize};

use crate::tables::{FilingStatus, TaxYearTable};
use crate::error::TableResult;

/// Adjustments that reduce gross income to AGI
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub retirement_401k: f64,
    pub traditional_ira: f64,
    pub self_employed_health_insurance: f64,
    pub hsa: f64,
    /// Capped by the table's student loan interest limit
    pub student_loan_interest: f64,
}

impl Adjustments {
    /// Total adjustment allowed under `table`
    pub fn total(&self, table: &TaxYearTable) -> f64 {
        self.retirement_401k.max(0.0)
            + self.traditional_ira.max(0.0)
            + self.self_employed_health_insurance.max(0.0)
            + self.hsa.max(0.0)
            + self.student_loan_interest.max(0.0).min(table.student_loan_interest_cap)
    }
}

/// Itemized deductions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemizedDeductions {
    pub mortgage_interest: f64,
    /// Real estate taxes; not subject to the state and local tax cap
    pub property_tax: f64,
    pub state_local_taxes: f64,
    pub charitable_donations: f64,
    pub other: f64,
}

impl ItemizedDeductions {
    /// State and local taxes after the table's cap
    pub fn capped_salt(&self, table: &TaxYearTable) -> f64 {
        self.state_local_taxes.max(0.0).min(table.salt_cap)
    }

    pub fn total(&self, table: &TaxYearTable) -> f64 {
        self.mortgage_interest.max(0.0)
            + self.property_tax.max(0.0)
            + self.capped_salt(table)
            + self.charitable_donations.max(0.0)
            + self.other.max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeductionKind {
    Standard,
    Itemized,
}

/// Deduction actually taken
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionChoice {
    pub kind: DeductionKind,
    pub amount: f64,
}

/// The larger of the standard deduction and, when elected, the itemized total
pub fn choose_deduction(
    table: &TaxYearTable,
    status: FilingStatus,
    itemized: Option<&ItemizedDeductions>,
) -> TableResult<DeductionChoice> {
    let standard = table.standard_deduction(status)?;
    let choice = match itemized.map(|items| items.total(table)) {
        Some(amount) if amount > standard => DeductionChoice {
            kind: DeductionKind::Itemized,
            amount,
        },
        _ => DeductionChoice {
            kind: DeductionKind::Standard,
            amount: standard,
        },
    };
    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::federal_2024;

    #[test]
    fn test_student_loan_interest_capped() {
        let table = federal_2024();
        let adjustments = Adjustments {
            retirement_401k: 5_000.0,
            student_loan_interest: 4_000.0,
            ..Adjustments::default()
        };
        assert_eq!(adjustments.total(&table), 7_500.0);
    }

    #[test]
    fn test_salt_cap_excludes_property_tax() {
        let table = federal_2024();
        let items = ItemizedDeductions {
            mortgage_interest: 12_000.0,
            property_tax: 6_000.0,
            state_local_taxes: 8_000.0,
            charitable_donations: 1_000.0,
            other: 0.0,
        };
        assert_eq!(items.capped_salt(&table), 8_000.0);
        assert_eq!(items.total(&table), 27_000.0);

        let high_state = ItemizedDeductions {
            state_local_taxes: 15_000.0,
            ..items
        };
        assert_eq!(high_state.capped_salt(&table), 10_000.0);
        assert_eq!(high_state.total(&table), 29_000.0);
    }

    #[test]
    fn test_choose_deduction() {
        let table = federal_2024();
        let small = ItemizedDeductions {
            mortgage_interest: 5_000.0,
            ..ItemizedDeductions::default()
        };
        let large = ItemizedDeductions {
            mortgage_interest: 20_000.0,
            ..ItemizedDeductions::default()
        };

        let not_elected = choose_deduction(&table, FilingStatus::Single, None).unwrap();
        assert_eq!(not_elected.kind, DeductionKind::Standard);
        assert_eq!(not_elected.amount, 14_600.0);

        let small_choice = choose_deduction(&table, FilingStatus::Single, Some(&small)).unwrap();
        assert_eq!(small_choice.kind, DeductionKind::Standard);

        let large_choice = choose_deduction(&table, FilingStatus::Single, Some(&large)).unwrap();
        assert_eq!(large_choice.kind, DeductionKind::Itemized);
        assert_eq!(large_choice.amount, 20_000.0);

        // Same itemized total loses to the larger joint standard deduction
        let joint = choose_deduction(&table, FilingStatus::MarriedJointly, Some(&large)).unwrap();
        assert_eq!(joint.amount, 29_200.0);
    }
}
