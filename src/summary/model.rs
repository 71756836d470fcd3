use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Category used when a transaction carries no label
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Category bucket holding the fixed expense total
pub const FIXED_EXPENSES_CATEGORY: &str = "Despesas fixas";

/// Day of month fixed expenses fall on when the household doesn't set one
pub const DEFAULT_DUE_DAY: u32 = 5;

/// A variable expense, already normalized for the summary engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub total_amount: f64,
    pub category: String,
}

impl Transaction {
    pub fn new(date: Option<NaiveDate>, total_amount: f64, category: Option<&str>) -> Self {
        Self {
            date,
            total_amount,
            category: normalize_category(category),
        }
    }

    /// Build a transaction from an ISO date string. Unparseable dates become `None`
    /// and the transaction is left out of the daily series.
    pub fn from_iso(date: &str, total_amount: f64, category: Option<&str>) -> Self {
        Self::new(parse_iso_date(date), total_amount, category)
    }
}

/// A recurring monthly charge (rent, subscriptions)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedExpense {
    pub id: String,
    pub description: String,
    pub amount: f64,
}

/// Cost split and incomes of the two household members
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialConfig {
    pub share_member_a: f64,
    pub share_member_b: f64,
    pub income_member_a: f64,
    pub income_member_b: f64,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        Self {
            share_member_a: 0.5,
            share_member_b: 0.5,
            income_member_a: 0.0,
            income_member_b: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoint {
    pub day: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextDueExpense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDateTime,
}

/// Everything the dashboard shows for a month or a year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryComputation {
    pub total_spent: f64,
    pub share_member_a: f64,
    pub share_member_b: f64,
    pub income_member_a: f64,
    pub income_member_b: f64,
    pub income_total: f64,
    /// Member A's part of the spend as a percentage of their income
    pub income_commitment_member_a: f64,
    pub income_commitment_member_b: f64,
    pub income_commitment_total: f64,
    pub monthly_categories: Vec<CategoryBreakdown>,
    pub annual_categories: Vec<CategoryBreakdown>,
    pub next_due: Vec<NextDueExpense>,
    /// Number of variable transactions in the period
    pub synced_logs: usize,
    pub daily_average: f64,
    pub cost_per_day: f64,
    pub cost_per_business_day: f64,
    pub month_end_projection: f64,
    pub days_considered: u32,
    pub days_in_month: u32,
    pub business_days: u32,
    pub daily_series: Vec<DailyPoint>,
}

/// Capitalize the first character; missing or empty labels become "Outros".
pub fn normalize_category(category: Option<&str>) -> String {
    let Some(category) = category.filter(|c| !c.is_empty()) else {
        return DEFAULT_CATEGORY.to_string();
    };

    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => DEFAULT_CATEGORY.to_string(),
    }
}

/// Parse `YYYY-MM-DD`, ignoring any trailing time component.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let date_part = value
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
