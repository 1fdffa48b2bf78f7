//! Running state of a growth projection

/// State of the balance between compounding periods
#[derive(Debug, Clone)]
pub struct GrowthState {
    /// Current projection period (1-indexed; 0 before the first period)
    pub period_index: u32,

    /// Projection year the current period belongs to (1-indexed)
    pub year: u32,

    /// Period within the year (1..=periods_per_year)
    pub position_in_year: u32,

    /// Balance carried into the current period
    pub balance: f64,

    /// Principal plus every contribution so far
    pub cumulative_contributions: f64,

    /// Interest accrued so far
    pub cumulative_interest: f64,

    /// Contributions made in the current year
    pub year_contributions: f64,

    /// Interest accrued in the current year
    pub year_interest: f64,

    /// Contributions so far, one entry per contribution schedule
    pub contributions_by_schedule: Vec<f64>,
}

impl GrowthState {
    /// Initial state holding only the opening principal
    pub fn opening(principal: f64, schedules: usize) -> Self {
        Self {
            period_index: 0,
            year: 0,
            position_in_year: 0,
            balance: principal,
            cumulative_contributions: principal,
            cumulative_interest: 0.0,
            year_contributions: 0.0,
            year_interest: 0.0,
            contributions_by_schedule: vec![0.0; schedules],
        }
    }

    /// Advance to the next compounding period
    pub fn advance_period(&mut self, periods_per_year: u32) {
        self.period_index += 1;

        let periods_per_year = periods_per_year.max(1);
        self.year = (self.period_index - 1) / periods_per_year + 1;
        self.position_in_year = (self.period_index - 1) % periods_per_year + 1;

        // Reset yearly accumulators at the start of each year
        if self.position_in_year == 1 {
            self.year_contributions = 0.0;
            self.year_interest = 0.0;
        }
    }

    /// True when the current period closes a year
    pub fn is_year_end(&self, periods_per_year: u32) -> bool {
        self.position_in_year == periods_per_year.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_years() {
        let mut state = GrowthState::opening(1_000.0, 1);
        assert_eq!(state.cumulative_contributions, 1_000.0);

        for _ in 0..13 {
            state.advance_period(12);
        }
        assert_eq!(state.period_index, 13);
        assert_eq!(state.year, 2);
        assert_eq!(state.position_in_year, 1);
        assert!(!state.is_year_end(12));
    }

    #[test]
    fn test_year_accumulators_reset() {
        let mut state = GrowthState::opening(0.0, 0);
        state.advance_period(4);
        state.year_interest = 5.0;
        state.year_contributions = 10.0;

        for _ in 0..3 {
            state.advance_period(4);
        }
        assert!(state.is_year_end(4));
        assert_eq!(state.year_interest, 5.0);

        state.advance_period(4);
        assert_eq!(state.year_interest, 0.0);
        assert_eq!(state.year_contributions, 0.0);
    }
}
