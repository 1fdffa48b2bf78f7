//! Closed-form level annuity values
//!
//! Used as the analytic counterpart of the period-by-period engines: the
//! retirement back-solve inverts the annuity-due future value, and the growth
//! engine's no-escalation case can be checked against it.

use crate::rates::{discount_factor, growth_factor};

/// Helper functions for level annuity calculations
pub struct AnnuityCalculator;

impl AnnuityCalculator {
    /// Accumulation factor ((1+r)^n - 1) / r, or n when the rate is zero
    pub fn fv_factor(periodic_rate: f64, periods: u32) -> f64 {
        if periodic_rate == 0.0 {
            return periods as f64;
        }
        (growth_factor(periodic_rate, periods) - 1.0) / periodic_rate
    }

    /// Future value of `payment` paid at the end of each of `periods` periods
    pub fn fv_ordinary(payment: f64, periods: u32, periodic_rate: f64) -> f64 {
        payment * Self::fv_factor(periodic_rate, periods)
    }

    /// Future value of `payment` paid at the start of each of `periods` periods
    pub fn fv_due(payment: f64, periods: u32, periodic_rate: f64) -> f64 {
        Self::fv_ordinary(payment, periods, periodic_rate) * (1.0 + periodic_rate)
    }

    /// Present value of `payment` paid at the end of each of `periods` periods
    pub fn pv_ordinary(payment: f64, periods: u32, periodic_rate: f64) -> f64 {
        if periodic_rate == 0.0 {
            return payment * periods as f64;
        }
        payment * (1.0 - discount_factor(periodic_rate, periods)) / periodic_rate
    }

    /// Future value of a lump sum plus a level annuity due
    pub fn future_value_with_deposits_due(
        present_value: f64,
        payment: f64,
        periods: u32,
        periodic_rate: f64,
    ) -> f64 {
        present_value * growth_factor(periodic_rate, periods)
            + Self::fv_due(payment, periods, periodic_rate)
    }

    /// Level start-of-period payment that grows `present_value` into `target`.
    ///
    /// Returns None when there are no periods to save over or no finite payment exists.
    pub fn payment_for_future_value_due(
        target: f64,
        present_value: f64,
        periods: u32,
        periodic_rate: f64,
    ) -> Option<f64> {
        if periods == 0 {
            return None;
        }
        let growth = growth_factor(periodic_rate, periods);
        let shortfall = target - present_value * growth;
        let factor = Self::fv_factor(periodic_rate, periods) * (1.0 + periodic_rate);
        if factor == 0.0 || !factor.is_finite() {
            return None;
        }
        Some(shortfall / factor)
    }
}
