//! Lazy amortization schedule and yearly aggregation

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::terms::fixed_payment;

/// One payment of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Payment number (1-indexed)
    pub period_index: u32,
    pub payment_amount: f64,
    pub principal_portion: f64,
    pub interest_portion: f64,
    pub ending_balance: f64,
    pub cumulative_interest: f64,
    pub cumulative_principal: f64,
    pub payment_date: Option<NaiveDate>,
}

/// Iterator over the payments of a fixed-payment loan.
///
/// Rows are produced on demand, so `.take(12)` computes twelve periods and
/// nothing more. Cloning a fresh schedule restarts it from period 1.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    payment: f64,
    periodic_rate: f64,
    total_periods: u32,
    next_period: u32,
    balance: f64,
    cumulative_interest: f64,
    cumulative_principal: f64,
    dating: Option<(NaiveDate, u32)>,
}

impl AmortizationSchedule {
    pub fn new(principal: f64, periodic_rate: f64, total_periods: u32) -> Self {
        let payment = fixed_payment(principal, periodic_rate, total_periods);
        // Nothing to amortize: the schedule is empty
        let total_periods = if payment > 0.0 { total_periods } else { 0 };

        Self {
            payment,
            periodic_rate,
            total_periods,
            next_period: 1,
            balance: principal.max(0.0),
            cumulative_interest: 0.0,
            cumulative_principal: 0.0,
            dating: None,
        }
    }

    /// Attach calendar dates: the first payment falls on `first_payment`
    pub fn dated(mut self, first_payment: NaiveDate, periods_per_year: u32) -> Self {
        self.dating = Some((first_payment, periods_per_year));
        self
    }

    pub fn payment(&self) -> f64 {
        self.payment
    }

    pub fn total_periods(&self) -> u32 {
        self.total_periods
    }

    fn payment_date(&self, period_index: u32) -> Option<NaiveDate> {
        let (start, periods_per_year) = self.dating?;
        period_date(start, period_index - 1, periods_per_year)
    }
}

impl Iterator for AmortizationSchedule {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<AmortizationRow> {
        if self.next_period > self.total_periods {
            return None;
        }
        let period_index = self.next_period;
        self.next_period += 1;

        let interest_portion = self.balance * self.periodic_rate;
        let principal_portion = self.payment - interest_portion;

        // The last payment retires the loan; whatever is left is float residue
        self.balance = if period_index == self.total_periods {
            0.0
        } else {
            (self.balance - principal_portion).max(0.0)
        };

        self.cumulative_interest += interest_portion;
        self.cumulative_principal += principal_portion;

        Some(AmortizationRow {
            period_index,
            payment_amount: self.payment,
            principal_portion,
            interest_portion,
            ending_balance: self.balance,
            cumulative_interest: self.cumulative_interest,
            cumulative_principal: self.cumulative_principal,
            payment_date: self.payment_date(period_index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_periods + 1).saturating_sub(self.next_period) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AmortizationSchedule {}

/// Calendar date `offset` periods after `start`.
///
/// Whole-month frequencies step by calendar months, anything else by days.
pub fn period_date(start: NaiveDate, offset: u32, periods_per_year: u32) -> Option<NaiveDate> {
    if periods_per_year == 0 {
        return None;
    }
    if 12 % periods_per_year == 0 {
        let months = offset.checked_mul(12 / periods_per_year)?;
        start.checked_add_months(Months::new(months))
    } else {
        let days = (offset as u64 * 365) / periods_per_year as u64;
        start.checked_add_days(Days::new(days))
    }
}

/// Principal and interest paid in one year of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Aggregate schedule rows into years.
///
/// A year row is closed at every year boundary and at the final row, so a
/// partial last year still appears.
pub fn yearly_breakdown<I>(rows: I, periods_per_year: u32) -> Vec<AmortizationYear>
where
    I: IntoIterator<Item = AmortizationRow>,
{
    let periods_per_year = periods_per_year.max(1);
    let mut years = Vec::new();
    let mut principal = 0.0;
    let mut interest = 0.0;
    let mut last: Option<AmortizationRow> = None;

    for row in rows {
        principal += row.principal_portion;
        interest += row.interest_portion;

        if row.period_index % periods_per_year == 0 {
            years.push(AmortizationYear {
                year: row.period_index / periods_per_year,
                principal,
                interest,
                balance: row.ending_balance,
            });
            principal = 0.0;
            interest = 0.0;
            last = None;
        } else {
            last = Some(row);
        }
    }

    if let Some(row) = last {
        years.push(AmortizationYear {
            year: row.period_index.div_ceil(periods_per_year),
            principal,
            interest,
            balance: row.ending_balance,
        });
    }

    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::LoanTerms;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_schedule_retires_principal() {
        let terms = LoanTerms::monthly(250_000.0, 6.5, 30);
        let rows: Vec<_> = terms.schedule().collect();

        assert_eq!(rows.len(), 360);
        assert_eq!(rows.last().unwrap().period_index, 360);
        assert_eq!(rows.last().unwrap().ending_balance, 0.0);

        let principal_paid: f64 = rows.iter().map(|r| r.principal_portion).sum();
        assert_abs_diff_eq!(principal_paid, 250_000.0, epsilon = 1e-4);

        let payments: f64 = rows.iter().map(|r| r.payment_amount).sum();
        assert_relative_eq!(payments, terms.summary().total_payment, max_relative = 1e-12);

        let interest: f64 = rows.iter().map(|r| r.interest_portion).sum();
        assert_abs_diff_eq!(interest, terms.summary().total_interest, epsilon = 1e-4);
    }

    #[test]
    fn test_balance_non_increasing() {
        let rows: Vec<_> = LoanTerms::new(18_000.0, 11.0, 48, 12).schedule().collect();

        for pair in rows.windows(2) {
            assert!(pair[1].ending_balance <= pair[0].ending_balance);
        }
        assert!(rows.iter().all(|r| r.ending_balance >= 0.0));
        assert_eq!(rows[47].ending_balance, 0.0);
    }

    #[test]
    fn test_first_payment_split() {
        let mut schedule = LoanTerms::monthly(250_000.0, 6.5, 30).schedule();
        let first = schedule.next().unwrap();

        assert_eq!(first.period_index, 1);
        assert_abs_diff_eq!(first.interest_portion, 1354.17, epsilon = 0.01);
        assert_abs_diff_eq!(first.principal_portion, 226.00, epsilon = 0.01);
        assert_abs_diff_eq!(first.ending_balance, 249_774.00, epsilon = 0.01);
    }

    #[test]
    fn test_prefix_and_restart() {
        let terms = LoanTerms::monthly(100_000.0, 5.0, 15);
        let schedule = terms.schedule();
        assert_eq!(schedule.len(), 180);

        let preview: Vec<_> = schedule.clone().take(12).collect();
        assert_eq!(preview.len(), 12);
        assert_eq!(preview[11].period_index, 12);

        // A fresh clone starts over at period 1
        let restarted: Vec<_> = schedule.take(12).collect();
        assert_eq!(preview, restarted);
    }

    #[test]
    fn test_empty_schedule() {
        assert_eq!(LoanTerms::new(0.0, 5.0, 12, 12).schedule().count(), 0);
        assert_eq!(LoanTerms::new(-5.0, 5.0, 12, 12).schedule().count(), 0);
        assert_eq!(LoanTerms::new(1_000.0, 5.0, 0, 12).schedule().count(), 0);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let rows: Vec<_> = LoanTerms::new(1_200.0, 0.0, 12, 12).schedule().collect();
        assert!(rows.iter().all(|r| r.interest_portion == 0.0));
        assert!(rows.iter().all(|r| (r.principal_portion - 100.0).abs() < 1e-12));
        assert_eq!(rows[11].ending_balance, 0.0);
    }

    #[test]
    fn test_dated_schedule() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let rows: Vec<_> = LoanTerms::monthly(10_000.0, 4.0, 1)
            .schedule()
            .dated(start, 12)
            .collect();

        assert_eq!(rows[0].payment_date, Some(start));
        // Month-end dates clamp to the shorter month
        assert_eq!(rows[1].payment_date, NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(rows[11].payment_date, NaiveDate::from_ymd_opt(2025, 12, 31));
    }

    #[test]
    fn test_period_date_non_monthly() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(period_date(start, 2, 4), NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(period_date(start, 1, 52), NaiveDate::from_ymd_opt(2025, 1, 8));
        assert_eq!(period_date(start, 1, 0), None);
    }

    #[test]
    fn test_yearly_breakdown_totals() {
        let terms = LoanTerms::monthly(50_000.0, 7.0, 5);
        let years = yearly_breakdown(terms.schedule(), 12);

        assert_eq!(years.len(), 5);
        assert_eq!(years[4].year, 5);
        assert_eq!(years[4].balance, 0.0);

        let principal: f64 = years.iter().map(|y| y.principal).sum();
        let interest: f64 = years.iter().map(|y| y.interest).sum();
        assert_abs_diff_eq!(principal, 50_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(interest, terms.summary().total_interest, epsilon = 1e-6);
    }

    #[test]
    fn test_yearly_breakdown_partial_year() {
        let years = yearly_breakdown(LoanTerms::new(9_000.0, 6.0, 18, 12).schedule(), 12);

        assert_eq!(years.len(), 2);
        assert_eq!(years[1].year, 2);
        assert_eq!(years[1].balance, 0.0);
    }
}
