use chrono::NaiveDate;
use household::summary::{
    build_annual_summary, build_daily_series, build_monthly_summary, FinancialConfig,
    FixedExpense, MonthPeriod, SummaryComputation, Transaction,
};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn period(y: i32, m: u32) -> MonthPeriod {
    MonthPeriod::new(y, m).unwrap()
}

fn fixed(id: &str, amount: f64) -> FixedExpense {
    FixedExpense {
        id: id.to_string(),
        description: id.to_uppercase(),
        amount,
    }
}

/// A reference date well after every month used below
fn later() -> NaiveDate {
    date(2030, 1, 1)
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new(Some(date(2024, 3, 2)), 120.5, Some("alimentação")),
        Transaction::new(Some(date(2024, 3, 2)), 35.0, Some("lanche")),
        Transaction::new(Some(date(2024, 3, 15)), 80.25, None),
        Transaction::new(Some(date(2024, 3, 31)), 300.0, Some("alimentação")),
        Transaction::new(Some(date(2024, 3, 20)), 0.0, Some("saúde")),
    ]
}

fn sample_fixed() -> Vec<FixedExpense> {
    vec![fixed("rent", 1500.0), fixed("internet", 99.9)]
}

fn monthly_sample() -> SummaryComputation {
    build_monthly_summary(
        &sample_transactions(),
        &sample_fixed(),
        period(2024, 3),
        &FinancialConfig::default(),
        10,
        later(),
    )
}

#[test]
fn test_monthly_total_is_variables_plus_fixed() {
    let summary = monthly_sample();
    let variables: f64 = sample_transactions().iter().map(|t| t.total_amount).sum();
    let fixed: f64 = sample_fixed().iter().map(|f| f.amount).sum();
    assert_close(summary.total_spent, variables + fixed);
}

#[test]
fn test_annual_total_annualizes_fixed() {
    let transactions = sample_transactions();
    let summary = build_annual_summary(
        &transactions,
        &sample_fixed(),
        2024,
        &FinancialConfig::default(),
    );
    let variables: f64 = transactions.iter().map(|t| t.total_amount).sum();
    assert_close(summary.total_spent, variables + 1599.9 * 12.0);
}

#[test]
fn test_category_percentages_match_total() {
    let summary = monthly_sample();
    for category in &summary.monthly_categories {
        assert_close(
            category.percentage,
            category.value / summary.total_spent * 100.0,
        );
    }
    let total: f64 = summary
        .monthly_categories
        .iter()
        .map(|c| c.percentage)
        .sum();
    assert_close(total, 100.0);
}

#[test]
fn test_category_percentages_zero_without_spend() {
    let transactions = vec![Transaction::new(Some(date(2024, 3, 1)), 0.0, Some("lazer"))];
    let summary = build_monthly_summary(
        &transactions,
        &[],
        period(2024, 3),
        &FinancialConfig::default(),
        5,
        later(),
    );
    assert_eq!(summary.monthly_categories.len(), 1);
    assert_eq!(summary.monthly_categories[0].percentage, 0.0);
}

#[test]
fn test_monthly_categories_order_and_fixed_bucket() {
    let summary = monthly_sample();
    let names: Vec<&str> = summary
        .monthly_categories
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Alimentação", "Lanche", "Outros", "Saúde", "Despesas fixas"]
    );
    assert_close(summary.monthly_categories[0].value, 420.5);
    assert_close(summary.monthly_categories[4].value, 1599.9);
}

#[test]
fn test_daily_series_length_and_sum() {
    let summary = monthly_sample();
    assert_eq!(summary.daily_series.len(), summary.days_in_month as usize);
    let total: f64 = summary.daily_series.iter().map(|p| p.value).sum();
    assert_close(total, summary.total_spent);

    for (index, point) in summary.daily_series.iter().enumerate() {
        assert_eq!(point.day as usize, index + 1);
    }
    assert_close(summary.daily_series[1].value, 155.5);
    assert_close(summary.daily_series[9].value, 1599.9);
    assert_close(summary.daily_series[30].value, 300.0);
}

#[test]
fn test_due_day_clamped_to_month_end() {
    let series = build_daily_series(&[], &[fixed("rent", 700.0)], 30, true, 31);
    assert_eq!(series[29].value, 700.0);
    assert!(series[..29].iter().all(|p| p.value == 0.0));
}

#[test]
fn test_summaries_are_idempotent() {
    let first = monthly_sample();
    let second = monthly_sample();
    assert_eq!(first, second);
    assert_eq!(first.total_spent.to_bits(), second.total_spent.to_bits());

    let config = FinancialConfig {
        share_member_a: 0.7,
        share_member_b: 0.3,
        income_member_a: 4000.0,
        income_member_b: 2500.0,
    };
    let first = build_annual_summary(&sample_transactions(), &sample_fixed(), 2024, &config);
    let second = build_annual_summary(&sample_transactions(), &sample_fixed(), 2024, &config);
    assert_eq!(first, second);
}

#[test]
fn test_leap_february_with_single_fixed_expense() {
    let summary = build_monthly_summary(
        &[],
        &[fixed("rent", 100.0)],
        period(2024, 2),
        &FinancialConfig::default(),
        5,
        later(),
    );

    assert_eq!(summary.days_in_month, 29);
    assert_eq!(summary.total_spent, 100.0);
    assert_eq!(summary.daily_series.len(), 29);
    assert_eq!(summary.daily_series[4].value, 100.0);
    for (index, point) in summary.daily_series.iter().enumerate() {
        if index != 4 {
            assert_eq!(point.value, 0.0);
        }
    }
}

#[test]
fn test_april_due_day_31_lands_on_30th() {
    let summary = build_monthly_summary(
        &[],
        &[fixed("rent", 100.0)],
        period(2024, 4),
        &FinancialConfig::default(),
        31,
        later(),
    );

    assert_eq!(summary.daily_series.len(), 30);
    assert_eq!(summary.daily_series[29].value, 100.0);
    assert_eq!(
        summary.next_due[0].due_date,
        date(2024, 4, 30).and_hms_opt(0, 0, 0).unwrap()
    );
}

#[test]
fn test_two_transactions_same_day() {
    let transactions = vec![
        Transaction::new(Some(date(2024, 5, 10)), 50.0, Some("mercado")),
        Transaction::new(Some(date(2024, 5, 10)), 30.0, Some("farmácia")),
    ];
    let today = date(2024, 5, 20);
    let summary = build_monthly_summary(
        &transactions,
        &[],
        period(2024, 5),
        &FinancialConfig::default(),
        5,
        today,
    );

    assert_eq!(summary.total_spent, 80.0);
    assert_eq!(summary.monthly_categories.len(), 2);
    assert_eq!(summary.monthly_categories[0].name, "Mercado");
    assert_eq!(summary.monthly_categories[0].value, 50.0);
    assert_eq!(summary.monthly_categories[1].name, "Farmácia");
    assert_eq!(summary.monthly_categories[1].value, 30.0);
    assert_eq!(summary.days_considered, 20);
    assert_eq!(summary.daily_average, 80.0 / 20.0);
    assert_eq!(summary.daily_series[9].value, 80.0);
}

#[test]
fn test_member_parts_and_guarded_commitment() {
    let config = FinancialConfig {
        share_member_a: 0.6,
        share_member_b: 0.4,
        income_member_a: 1000.0,
        income_member_b: 0.0,
    };
    let transactions = vec![Transaction::new(Some(date(2024, 6, 3)), 500.0, None)];
    let summary = build_monthly_summary(
        &transactions,
        &[],
        period(2024, 6),
        &config,
        5,
        later(),
    );

    assert_eq!(summary.total_spent, 500.0);
    assert_close(summary.share_member_a, 300.0);
    assert_close(summary.share_member_b, 200.0);
    assert_close(summary.income_commitment_member_a, 30.0);
    assert_eq!(summary.income_commitment_member_b, 0.0);
    assert_close(summary.income_commitment_total, 50.0);
    assert_eq!(summary.income_total, 1000.0);
}

#[test]
fn test_empty_inputs_produce_zero_summary() {
    let summary = build_monthly_summary(
        &[],
        &[],
        period(2024, 9),
        &FinancialConfig::default(),
        5,
        later(),
    );

    assert_eq!(summary.total_spent, 0.0);
    assert_eq!(summary.share_member_a, 0.0);
    assert_eq!(summary.share_member_b, 0.0);
    assert_eq!(summary.income_total, 0.0);
    assert_eq!(summary.income_commitment_member_a, 0.0);
    assert_eq!(summary.income_commitment_member_b, 0.0);
    assert_eq!(summary.income_commitment_total, 0.0);
    assert_eq!(summary.daily_average, 0.0);
    assert_eq!(summary.cost_per_day, 0.0);
    assert_eq!(summary.cost_per_business_day, 0.0);
    assert_eq!(summary.month_end_projection, 0.0);
    assert_eq!(summary.synced_logs, 0);
    assert_eq!(summary.daily_series.len(), 30);
    assert!(summary.daily_series.iter().all(|p| p.value == 0.0));
    assert!(summary.monthly_categories.is_empty());
    assert!(summary.next_due.is_empty());
    assert!(summary.total_spent.is_sign_positive());
}

#[test]
fn test_days_considered_within_month_bounds() {
    let periods = [period(2024, 2), period(2024, 3), period(2024, 4)];
    let todays = [date(2023, 1, 1), date(2024, 3, 1), date(2024, 3, 31), later()];

    for p in periods {
        for today in todays {
            let summary =
                build_monthly_summary(&[], &[], p, &FinancialConfig::default(), 5, today);
            assert!(summary.days_considered >= 1);
            assert!(summary.days_considered <= summary.days_in_month);
        }
    }
}

#[test]
fn test_monthly_daily_series_matches_standalone_builder() {
    let transactions = sample_transactions();
    let fixed_expenses = sample_fixed();
    let summary = monthly_sample();

    let standalone = build_daily_series(&transactions, &fixed_expenses, 31, true, 10);
    assert_eq!(summary.daily_series, standalone);

    let without_fixed = build_daily_series(&transactions, &fixed_expenses, 31, false, 10);
    assert_close(without_fixed[9].value, 0.0);
}
