//! Household spend summaries.
//!
//! Pure computation over in-memory transactions and fixed expenses: totals,
//! per-member parts, income commitment, category breakdowns, a daily series and
//! next-due projections. Nothing here reads the clock or touches the disk.

mod calendar;
mod engine;
mod insight;
mod model;

pub use calendar::{count_business_days, days_elapsed, days_in_month, due_date, MonthPeriod};
pub use engine::{build_annual_summary, build_daily_series, build_monthly_summary};
pub use insight::{
    category_insight, commitment_alerts, CategoryInsight, CommitmentAlert, CommitmentSubject,
    InsightKind, COMBINED_COMMITMENT_LIMIT, MEMBER_COMMITMENT_LIMIT,
};
pub use model::{
    normalize_category, parse_iso_date, CategoryBreakdown, DailyPoint, FinancialConfig,
    FixedExpense, NextDueExpense, SummaryComputation, Transaction, DEFAULT_CATEGORY,
    DEFAULT_DUE_DAY, FIXED_EXPENSES_CATEGORY,
};
