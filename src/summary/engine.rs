use chrono::{Datelike, NaiveDate};
use tracing::{debug, instrument};

use super::calendar::{clamp_due_day, count_business_days, days_elapsed, due_date, MonthPeriod};
use super::model::{
    CategoryBreakdown, DailyPoint, FinancialConfig, FixedExpense, NextDueExpense,
    SummaryComputation, Transaction, FIXED_EXPENSES_CATEGORY,
};

/// Months in a year, used to annualize monthly fixed expenses and incomes
const MONTHS_PER_YEAR: f64 = 12.0;

fn sum_transactions(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .fold(0.0, |acc, transaction| acc + transaction.total_amount)
}

fn sum_fixed_expenses(fixed_expenses: &[FixedExpense]) -> f64 {
    fixed_expenses
        .iter()
        .fold(0.0, |acc, expense| acc + expense.amount)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Sum per category in first-seen order.
///
/// The fixed bucket is appended last, unless a transaction already used that
/// name: then its value is overwritten in place so names stay unique.
fn group_by_category(transactions: &[Transaction], fixed_total: f64) -> Vec<(String, f64)> {
    let mut groups: Vec<(String, f64)> = Vec::new();

    for transaction in transactions {
        match groups
            .iter_mut()
            .find(|(name, _)| *name == transaction.category)
        {
            Some((_, value)) => *value += transaction.total_amount,
            None => groups.push((transaction.category.clone(), transaction.total_amount)),
        }
    }

    if fixed_total > 0.0 {
        match groups
            .iter_mut()
            .find(|(name, _)| name == FIXED_EXPENSES_CATEGORY)
        {
            Some((_, value)) => *value = fixed_total,
            None => groups.push((FIXED_EXPENSES_CATEGORY.to_string(), fixed_total)),
        }
    }

    groups
}

fn to_category_breakdowns(groups: Vec<(String, f64)>, total_base: f64) -> Vec<CategoryBreakdown> {
    groups
        .into_iter()
        .map(|(name, value)| CategoryBreakdown {
            name,
            value,
            percentage: if total_base <= 0.0 {
                0.0
            } else {
                value / total_base * 100.0
            },
        })
        .collect()
}

/// Member parts and income commitment percentages
struct IncomeStats {
    share_member_a: f64,
    share_member_b: f64,
    income_member_a: f64,
    income_member_b: f64,
    income_total: f64,
    commitment_member_a: f64,
    commitment_member_b: f64,
    commitment_total: f64,
}

impl IncomeStats {
    fn compute(total_spent: f64, config: &FinancialConfig, multiplier: f64) -> Self {
        let share_member_a = total_spent * config.share_member_a;
        let share_member_b = total_spent * config.share_member_b;
        let income_member_a = config.income_member_a * multiplier;
        let income_member_b = config.income_member_b * multiplier;
        let income_total = income_member_a + income_member_b;

        Self {
            share_member_a,
            share_member_b,
            income_member_a,
            income_member_b,
            income_total,
            commitment_member_a: ratio(share_member_a, income_member_a) * 100.0,
            commitment_member_b: ratio(share_member_b, income_member_b) * 100.0,
            commitment_total: ratio(total_spent, income_total) * 100.0,
        }
    }
}

/// Spend per day of the month.
///
/// Transactions without a date, or dated outside `1..=days_in_month`, are
/// skipped. With `include_fixed`, the whole fixed total lands on the due day
/// instead of being spread over the month.
pub fn build_daily_series(
    transactions: &[Transaction],
    fixed_expenses: &[FixedExpense],
    days_in_month: u32,
    include_fixed: bool,
    fixed_due_day: u32,
) -> Vec<DailyPoint> {
    let mut totals = vec![0.0_f64; days_in_month as usize];

    for transaction in transactions {
        let Some(date) = transaction.date else {
            continue;
        };
        let day = date.day();
        if (1..=days_in_month).contains(&day) {
            totals[(day - 1) as usize] += transaction.total_amount;
        }
    }

    let total_fixed = sum_fixed_expenses(fixed_expenses);
    if include_fixed && total_fixed > 0.0 && days_in_month > 0 {
        let due_day = clamp_due_day(fixed_due_day, days_in_month);
        totals[(due_day - 1) as usize] += total_fixed;
    }

    totals
        .into_iter()
        .zip(1..)
        .map(|(value, day)| DailyPoint { day, value })
        .collect()
}

/// Monthly dashboard figures.
///
/// `transactions` must already be limited to `period`; they are summed as
/// given. `today` decides how many days of the month have elapsed.
#[instrument(
    skip(transactions, fixed_expenses, config, period),
    fields(
        period = %period,
        num_transactions = transactions.len(),
        num_fixed = fixed_expenses.len(),
    )
)]
pub fn build_monthly_summary(
    transactions: &[Transaction],
    fixed_expenses: &[FixedExpense],
    period: MonthPeriod,
    config: &FinancialConfig,
    fixed_due_day: u32,
    today: NaiveDate,
) -> SummaryComputation {
    let total_variables = sum_transactions(transactions);
    let total_fixed = sum_fixed_expenses(fixed_expenses);
    let total_spent = total_variables + total_fixed;

    let days_in_month = period.days_in_month();
    let days_considered = days_elapsed(period, today);
    let business_days = count_business_days(period);

    let daily_average = ratio(total_spent, f64::from(days_considered));
    let cost_per_day = ratio(total_spent, f64::from(days_in_month));
    let cost_per_business_day = ratio(total_spent, f64::from(business_days));
    let month_end_projection = daily_average * f64::from(days_in_month);

    debug!(
        total_variables,
        total_fixed, days_in_month, days_considered, business_days, "Computed monthly totals"
    );

    let daily_series = build_daily_series(
        transactions,
        fixed_expenses,
        days_in_month,
        true,
        fixed_due_day,
    );

    let monthly_categories =
        to_category_breakdowns(group_by_category(transactions, total_fixed), total_spent);

    let due = due_date(period, fixed_due_day);
    let next_due = fixed_expenses
        .iter()
        .map(|expense| NextDueExpense {
            id: expense.id.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
            due_date: due,
        })
        .collect();

    let income = IncomeStats::compute(total_spent, config, 1.0);

    SummaryComputation {
        total_spent,
        share_member_a: income.share_member_a,
        share_member_b: income.share_member_b,
        income_member_a: income.income_member_a,
        income_member_b: income.income_member_b,
        income_total: income.income_total,
        income_commitment_member_a: income.commitment_member_a,
        income_commitment_member_b: income.commitment_member_b,
        income_commitment_total: income.commitment_total,
        monthly_categories,
        annual_categories: Vec::new(),
        next_due,
        synced_logs: transactions.len(),
        daily_average,
        cost_per_day,
        cost_per_business_day,
        month_end_projection,
        days_considered,
        days_in_month,
        business_days,
        daily_series,
    }
}

/// Yearly dashboard figures.
///
/// Fixed expenses are annualized as a flat `monthly total * 12`, without
/// prorating for expenses added mid-year. Incomes are annualized the same way.
/// Day-based fields are zero and the daily series is empty.
#[instrument(
    skip(transactions, fixed_expenses, config),
    fields(num_transactions = transactions.len(), num_fixed = fixed_expenses.len())
)]
pub fn build_annual_summary(
    transactions: &[Transaction],
    fixed_expenses: &[FixedExpense],
    year: i32,
    config: &FinancialConfig,
) -> SummaryComputation {
    let total_variables = sum_transactions(transactions);
    let total_fixed_annual = sum_fixed_expenses(fixed_expenses) * MONTHS_PER_YEAR;
    let total_spent = total_variables + total_fixed_annual;

    debug!(total_variables, total_fixed_annual, "Computed annual totals");

    let annual_categories =
        to_category_breakdowns(group_by_category(transactions, total_fixed_annual), total_spent);

    let income = IncomeStats::compute(total_spent, config, MONTHS_PER_YEAR);

    SummaryComputation {
        total_spent,
        share_member_a: income.share_member_a,
        share_member_b: income.share_member_b,
        income_member_a: income.income_member_a,
        income_member_b: income.income_member_b,
        income_total: income.income_total,
        income_commitment_member_a: income.commitment_member_a,
        income_commitment_member_b: income.commitment_member_b,
        income_commitment_total: income.commitment_total,
        monthly_categories: Vec::new(),
        annual_categories,
        next_due: Vec::new(),
        synced_logs: transactions.len(),
        daily_average: 0.0,
        cost_per_day: 0.0,
        cost_per_business_day: 0.0,
        month_end_projection: 0.0,
        days_considered: 0,
        days_in_month: 0,
        business_days: 0,
        daily_series: Vec::new(),
    }
}
