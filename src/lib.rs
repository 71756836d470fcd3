pub mod config;
pub mod error;
pub mod ledger;
pub mod summary;

pub use config::{HouseholdConfig, Member};
pub use error::{HouseholdError, Result};
pub use ledger::Ledger;
pub use summary::{
    build_annual_summary, build_daily_series, build_monthly_summary, FinancialConfig,
    MonthPeriod, SummaryComputation,
};
