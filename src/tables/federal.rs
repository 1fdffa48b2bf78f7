//! Built-in federal tables

use std::collections::BTreeMap;

use super::schedule::{BracketSchedule, FilingStatus};
use super::year::TaxYearTable;

type Rows = [(f64, Option<f64>, f64); 7];

const SINGLE_2024: Rows = [
    (0.0, Some(11_600.0), 0.10),
    (11_600.0, Some(47_150.0), 0.12),
    (47_150.0, Some(100_525.0), 0.22),
    (100_525.0, Some(191_950.0), 0.24),
    (191_950.0, Some(243_725.0), 0.32),
    (243_725.0, Some(609_350.0), 0.35),
    (609_350.0, None, 0.37),
];

const MARRIED_JOINTLY_2024: Rows = [
    (0.0, Some(23_200.0), 0.10),
    (23_200.0, Some(94_300.0), 0.12),
    (94_300.0, Some(201_050.0), 0.22),
    (201_050.0, Some(383_900.0), 0.24),
    (383_900.0, Some(487_450.0), 0.32),
    (487_450.0, Some(731_200.0), 0.35),
    (731_200.0, None, 0.37),
];

const MARRIED_SEPARATELY_2024: Rows = [
    (0.0, Some(11_600.0), 0.10),
    (11_600.0, Some(47_150.0), 0.12),
    (47_150.0, Some(100_525.0), 0.22),
    (100_525.0, Some(191_950.0), 0.24),
    (191_950.0, Some(243_725.0), 0.32),
    (243_725.0, Some(365_600.0), 0.35),
    (365_600.0, None, 0.37),
];

const HEAD_OF_HOUSEHOLD_2024: Rows = [
    (0.0, Some(16_550.0), 0.10),
    (16_550.0, Some(63_100.0), 0.12),
    (63_100.0, Some(100_500.0), 0.22),
    (100_500.0, Some(191_950.0), 0.24),
    (191_950.0, Some(243_700.0), 0.32),
    (243_700.0, Some(609_350.0), 0.35),
    (609_350.0, None, 0.37),
];

/// 2024 federal brackets, standard deductions and caps
pub fn federal_2024() -> TaxYearTable {
    let schedules = BTreeMap::from([
        (FilingStatus::Single, BracketSchedule::from_trusted_rows(&SINGLE_2024)),
        (FilingStatus::MarriedJointly, BracketSchedule::from_trusted_rows(&MARRIED_JOINTLY_2024)),
        (FilingStatus::MarriedSeparately, BracketSchedule::from_trusted_rows(&MARRIED_SEPARATELY_2024)),
        (FilingStatus::HeadOfHousehold, BracketSchedule::from_trusted_rows(&HEAD_OF_HOUSEHOLD_2024)),
    ]);
    let standard_deductions = BTreeMap::from([
        (FilingStatus::Single, 14_600.0),
        (FilingStatus::MarriedJointly, 29_200.0),
        (FilingStatus::MarriedSeparately, 14_600.0),
        (FilingStatus::HeadOfHousehold, 21_900.0),
    ]);

    TaxYearTable {
        year: 2024,
        schedules,
        standard_deductions,
        salt_cap: 10_000.0,
        student_loan_interest_cap: 2_500.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schedules_validate() {
        for rows in [&SINGLE_2024, &MARRIED_JOINTLY_2024, &MARRIED_SEPARATELY_2024, &HEAD_OF_HOUSEHOLD_2024] {
            let checked = BracketSchedule::from_rows(rows).unwrap();
            assert_eq!(checked, BracketSchedule::from_trusted_rows(rows));
        }
    }

    #[test]
    fn test_federal_2024_lookup() {
        let table = federal_2024();
        assert_eq!(table.year, 2024);
        assert_eq!(table.standard_deduction(FilingStatus::HeadOfHousehold).unwrap(), 21_900.0);
        assert_eq!(table.schedule(FilingStatus::MarriedJointly).unwrap().len(), 7);
        assert_eq!(table.schedule(FilingStatus::Single).unwrap().top_rate(), 0.37);
        assert_eq!(table.salt_cap, 10_000.0);
        assert_eq!(table.student_loan_interest_cap, 2_500.0);
    }
}
