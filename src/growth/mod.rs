//! Compound growth: the period engine and the calculators built on it

mod contribution;
mod state;
mod snapshot;
mod engine;
mod compound;
mod investment;
mod retirement;

pub use contribution::{ContributionSchedule, ContributionTiming};
pub use state::GrowthState;
pub use snapshot::{GrowthResult, GrowthSnapshot, GrowthYear};
pub use engine::{GrowthConfig, GrowthEngine};
pub use compound::{
    calculate_compound_interest, compare_compounding, compare_frequency, sample_schedule,
    CompoundInterestInputs, CompoundInterestResult, FrequencyComparison, MAX_DISPLAY_PERIODS,
};
pub use investment::{project_investment, InvestmentInputs, InvestmentResult, InvestmentYear, RiskProfile, DETAIL_YEARS};
pub use retirement::{
    project_retirement, IncomeSource, IncomeSourceKind, RetirementInputs, RetirementResult, RetirementYear,
    DEFAULT_SAFE_WITHDRAWAL_RATE_PERCENT,
};
