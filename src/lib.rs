//! fincalc - Personal finance calculation engine
//!
//! This library provides:
//! - Rate and period conversion across compounding frequencies
//! - Fixed-payment amortization for loans and mortgages (PMI, escrow, payoff date)
//! - Period-by-period compound growth with multiple contribution streams
//! - Compound interest, investment and retirement projections
//! - Progressive bracket tax estimation against year-versioned tax tables
//! - Batch scenario runner

pub mod rates;
pub mod annuity;
pub mod amortization;
pub mod growth;
pub mod tables;
pub mod tax;
pub mod error;
pub mod scenario;

// Re-export commonly used types
pub use rates::CompoundingFrequency;
pub use annuity::AnnuityCalculator;
pub use amortization::{AmortizationRow, AmortizationSchedule, LoanTerms, MortgageInputs, MortgageResult};
pub use growth::{ContributionSchedule, ContributionTiming, GrowthConfig, GrowthEngine, GrowthResult};
pub use tables::{FilingStatus, TaxTables, TaxYearTable};
pub use tax::{estimate_tax, TaxInputs, TaxResult};
pub use error::{TableError, TableResult};
pub use scenario::ScenarioRunner;
