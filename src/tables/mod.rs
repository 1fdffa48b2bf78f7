//! Tax tables: bracket schedules, standard deductions and caps by tax year

mod schedule;
mod federal;
mod year;
pub mod loader;

pub use schedule::{BracketSchedule, FilingStatus, TaxBracket};
pub use federal::federal_2024;
pub use year::{TaxTables, TaxYearTable};
pub use loader::{LoadedTables, DEFAULT_TABLES_PATH};
