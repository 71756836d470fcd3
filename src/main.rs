use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use household::config::{
    data_dir, load_fixed_expenses, load_household, load_transactions, HouseholdConfig,
    FIXED_FILE, FIXED_TEMPLATE, HOUSEHOLD_FILE, HOUSEHOLD_TEMPLATE, TRANSACTIONS_FILE,
    TRANSACTIONS_TEMPLATE,
};
use household::error::{HouseholdError, Result};
use household::summary::{
    build_annual_summary, build_daily_series, build_monthly_summary, category_insight,
    commitment_alerts, due_date, CategoryBreakdown, CategoryInsight, CommitmentAlert,
    CommitmentSubject, DailyPoint, InsightKind, MonthPeriod, NextDueExpense, SummaryComputation,
};
use household::Ledger;

/// Environment variable holding the log filter (e.g. `HOUSEHOLD_LOG=debug`)
const LOG_ENV: &str = "HOUSEHOLD_LOG";

#[derive(Parser)]
#[command(name = "household")]
#[command(version, about = "Shared household finance summaries", long_about = None)]
struct Cli {
    /// Path to data directory (default: ~/.household or XDG config)
    #[arg(short = 'C', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Reference date used as today (YYYY-MM-DD, default: local date)
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    today: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data directory with template files
    Init,

    /// Show household members and record counts
    Status,

    /// Monthly summary: totals, member parts, income commitment, categories
    Month {
        /// Month number 1-12 (default: current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Annual summary with fixed expenses and incomes annualized
    Year {
        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Spend per day of a month
    Daily {
        /// Month number 1-12 (default: current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Leave the fixed expense lump out of the series
        #[arg(long)]
        without_fixed: bool,
    },

    /// List fixed expenses with their due date
    Fixed {
        /// Month number 1-12 (default: current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine data directory
    let dir = match cli.data_dir {
        Some(p) => p,
        None => data_dir()?,
    };
    let today = resolve_today(cli.today.as_deref())?;
    debug!(data_dir = %dir.display(), %today, "Resolved CLI context");

    match cli.command {
        Commands::Init => cmd_init(&dir),
        Commands::Status => cmd_status(&dir, cli.json),
        Commands::Month { month, year } => {
            let period = resolve_period(month, year, today)?;
            cmd_month(&dir, period, today, cli.json)
        }
        Commands::Year { year } => cmd_year(&dir, year.unwrap_or(today.year()), cli.json),
        Commands::Daily {
            month,
            year,
            without_fixed,
        } => {
            let period = resolve_period(month, year, today)?;
            cmd_daily(&dir, period, !without_fixed, cli.json)
        }
        Commands::Fixed { month, year } => {
            let period = resolve_period(month, year, today)?;
            cmd_fixed(&dir, period, cli.json)
        }
    }
}

fn resolve_today(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| HouseholdError::InvalidDate(s.to_string())),
        None => Ok(Local::now().date_naive()),
    }
}

fn resolve_period(month: Option<u32>, year: Option<i32>, today: NaiveDate) -> Result<MonthPeriod> {
    let month = month.unwrap_or(today.month());
    let year = year.unwrap_or(today.year());
    if !(1..=12).contains(&month) {
        return Err(HouseholdError::InvalidMonth(month));
    }
    MonthPeriod::new(year, month).ok_or(HouseholdError::InvalidYear(year))
}

/// Everything a command needs from the data directory
struct Context {
    household: HouseholdConfig,
    ledger: Ledger,
}

fn load_context(dir: &Path) -> Result<Context> {
    if !dir.exists() {
        return Err(HouseholdError::DataDirNotFound(dir.to_path_buf()));
    }

    let household = load_household(dir)?;
    let transactions = load_transactions(dir)?;
    let fixed_expenses = load_fixed_expenses(dir)?;
    let ledger = Ledger::from_records(&transactions, &fixed_expenses);

    let undated = ledger.undated_count();
    if undated > 0 {
        warn!(undated, "Some transactions have no valid date and are left out of every period");
    }

    Ok(Context { household, ledger })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize data directory with template files
fn cmd_init(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Err(HouseholdError::AlreadyInitialized(dir.to_path_buf()));
    }

    fs::create_dir_all(dir)?;
    fs::write(dir.join(HOUSEHOLD_FILE), HOUSEHOLD_TEMPLATE)?;
    fs::write(dir.join(TRANSACTIONS_FILE), TRANSACTIONS_TEMPLATE)?;
    fs::write(dir.join(FIXED_FILE), FIXED_TEMPLATE)?;

    println!("Initialized household data at: {}", dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Describe your household:    $EDITOR {}/{}",
        dir.display(),
        HOUSEHOLD_FILE
    );
    println!(
        "  2. Record transactions:        $EDITOR {}/{}",
        dir.display(),
        TRANSACTIONS_FILE
    );
    println!(
        "  3. List fixed expenses:        $EDITOR {}/{}",
        dir.display(),
        FIXED_FILE
    );
    println!();
    println!("Then see where the money went:");
    println!("  household month --month <1-12> --year <year>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ROLE")]
    role: String,
    #[tabled(rename = "SHARE")]
    share: String,
    #[tabled(rename = "INCOME")]
    income: String,
}

#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "METRIC")]
    metric: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct CommitmentRow {
    #[tabled(rename = "WHO")]
    who: String,
    #[tabled(rename = "PART")]
    part: String,
    #[tabled(rename = "INCOME")]
    income: String,
    #[tabled(rename = "COMMITTED")]
    committed: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "CATEGORY")]
    name: String,
    #[tabled(rename = "VALUE")]
    value: String,
    #[tabled(rename = "SHARE")]
    percentage: String,
}

#[derive(Tabled)]
struct DueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "DUE")]
    due: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "DAY")]
    day: u32,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "SPENT")]
    value: String,
}

fn format_money(value: f64, currency_symbol: &str) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{}{}{}.{:02}",
        sign,
        currency_symbol,
        format_grouped_int(cents / 100),
        cents % 100
    )
}

fn format_grouped_int(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
}

fn commitment_rows(
    summary: &SummaryComputation,
    household: &HouseholdConfig,
) -> Vec<CommitmentRow> {
    let symbol = &household.currency_symbol;
    vec![
        CommitmentRow {
            who: household.member_a_label().to_string(),
            part: format_money(summary.share_member_a, symbol),
            income: format_money(summary.income_member_a, symbol),
            committed: format_percent(summary.income_commitment_member_a),
        },
        CommitmentRow {
            who: household.member_b_label().to_string(),
            part: format_money(summary.share_member_b, symbol),
            income: format_money(summary.income_member_b, symbol),
            committed: format_percent(summary.income_commitment_member_b),
        },
        CommitmentRow {
            who: "Couple".to_string(),
            part: format_money(summary.total_spent, symbol),
            income: format_money(summary.income_total, symbol),
            committed: format_percent(summary.income_commitment_total),
        },
    ]
}

fn category_rows(categories: &[CategoryBreakdown], currency_symbol: &str) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            value: format_money(c.value, currency_symbol),
            percentage: format_percent(c.percentage),
        })
        .collect()
}

fn alert_message(alert: &CommitmentAlert, household: &HouseholdConfig) -> String {
    match alert.subject {
        CommitmentSubject::MemberA => format!(
            "Warning: {} committed {} of income this month (limit {}).",
            household.member_a_label(),
            format_percent(alert.percentage),
            format_percent(alert.limit)
        ),
        CommitmentSubject::MemberB => format!(
            "Warning: {} committed {} of income this month (limit {}).",
            household.member_b_label(),
            format_percent(alert.percentage),
            format_percent(alert.limit)
        ),
        CommitmentSubject::Combined => format!(
            "Combined alert: the couple committed {} of income (limit {}).",
            format_percent(alert.percentage),
            format_percent(alert.limit)
        ),
    }
}

fn insight_message(insight: &CategoryInsight, previous: MonthPeriod) -> String {
    match insight.kind {
        InsightKind::Returned => format!("{} is growing again this month.", insight.name),
        InsightKind::Cleared => format!("{} dropped to zero compared to {}.", insight.name, previous),
        InsightKind::Increased => format!(
            "You spent +{} on {} compared to {}.",
            format_percent(insight.percent_change.abs()),
            insight.name,
            previous
        ),
        InsightKind::Decreased => format!(
            "{} fell {} compared to {}.",
            insight.name,
            format_percent(insight.percent_change.abs()),
            previous
        ),
    }
}

/// Show household status
fn cmd_status(dir: &Path, json: bool) -> Result<()> {
    let ctx = load_context(dir)?;
    let household = &ctx.household;

    if json {
        #[derive(Serialize)]
        struct StatusReport<'a> {
            household: &'a HouseholdConfig,
            transactions: usize,
            undated_transactions: usize,
            fixed_expenses: usize,
        }
        return print_json(&StatusReport {
            household,
            transactions: ctx.ledger.transactions().len(),
            undated_transactions: ctx.ledger.undated_count(),
            fixed_expenses: ctx.ledger.fixed_expenses().len(),
        });
    }

    println!("Household Status");
    println!("{}", "-".repeat(50));
    println!("Data directory:   {}", dir.display());
    println!("Household:        {}", household.name);
    println!("Fixed due day:    {:02}", household.fixed_due_day);
    println!("Transactions:     {}", ctx.ledger.transactions().len());
    println!("Fixed expenses:   {}", ctx.ledger.fixed_expenses().len());

    let undated = ctx.ledger.undated_count();
    if undated > 0 {
        println!("Undated:          {} (ignored in summaries)", undated);
    }

    if household.members.is_empty() {
        println!();
        println!("No members configured. The default 50/50 split is used.");
        return Ok(());
    }

    println!();
    let rows: Vec<MemberRow> = household
        .members
        .iter()
        .map(|m| MemberRow {
            name: m.name.clone(),
            role: if m.current { "you" } else { "partner" }.to_string(),
            share: format_percent(m.share_ratio * 100.0),
            income: format_money(m.income, &household.currency_symbol),
        })
        .collect();
    print_table(rows);

    Ok(())
}

#[derive(Serialize)]
struct MonthReport {
    period: String,
    summary: SummaryComputation,
    alerts: Vec<CommitmentAlert>,
    insight: Option<CategoryInsight>,
}

/// Show the monthly summary
fn cmd_month(dir: &Path, period: MonthPeriod, today: NaiveDate, json: bool) -> Result<()> {
    let ctx = load_context(dir)?;
    let household = &ctx.household;
    let config = household.financial_config();
    let fixed = ctx.ledger.fixed_expenses();

    let summary = build_monthly_summary(
        &ctx.ledger.month_transactions(period),
        fixed,
        period,
        &config,
        household.fixed_due_day,
        today,
    );

    // Compare categories with the month before
    let previous = period.previous();
    let insight = previous.and_then(|prev| {
        let previous_summary = build_monthly_summary(
            &ctx.ledger.month_transactions(prev),
            fixed,
            prev,
            &config,
            household.fixed_due_day,
            today,
        );
        category_insight(&summary.monthly_categories, &previous_summary.monthly_categories)
    });
    let alerts = commitment_alerts(&summary);

    if json {
        return print_json(&MonthReport {
            period: period.to_string(),
            summary,
            alerts,
            insight,
        });
    }

    let symbol = &household.currency_symbol;

    println!("Monthly Summary {} - {}", period, household.name);
    print_table(vec![
        KpiRow {
            metric: "Total spent".to_string(),
            value: format_money(summary.total_spent, symbol),
        },
        KpiRow {
            metric: "Transactions".to_string(),
            value: summary.synced_logs.to_string(),
        },
        KpiRow {
            metric: format!(
                "Daily average ({} of {} days)",
                summary.days_considered, summary.days_in_month
            ),
            value: format_money(summary.daily_average, symbol),
        },
        KpiRow {
            metric: "Cost per day".to_string(),
            value: format_money(summary.cost_per_day, symbol),
        },
        KpiRow {
            metric: format!("Cost per business day ({} days)", summary.business_days),
            value: format_money(summary.cost_per_business_day, symbol),
        },
        KpiRow {
            metric: "Month-end projection".to_string(),
            value: format_money(summary.month_end_projection, symbol),
        },
    ]);

    println!();
    println!("Income commitment");
    print_table(commitment_rows(&summary, household));

    println!();
    if summary.monthly_categories.is_empty() {
        println!("No spending recorded for {}.", period);
    } else {
        println!("Categories");
        print_table(category_rows(&summary.monthly_categories, symbol));
    }

    if let Some(first) = summary.next_due.first() {
        println!();
        println!(
            "Fixed expenses due on {}",
            first.due_date.format("%Y-%m-%d")
        );
        let rows: Vec<DueRow> = summary
            .next_due
            .iter()
            .map(|due| DueRow {
                id: due.id.clone(),
                description: due.description.clone(),
                amount: format_money(due.amount, symbol),
                due: due.due_date.format("%Y-%m-%d").to_string(),
            })
            .collect();
        print_table(rows);
    }

    if !alerts.is_empty() {
        println!();
        for alert in &alerts {
            println!("{}", alert_message(alert, household));
        }
    }

    if let (Some(insight), Some(prev)) = (&insight, previous) {
        println!();
        println!("{}", insight_message(insight, prev));
    }

    Ok(())
}

#[derive(Serialize)]
struct YearReport {
    year: i32,
    summary: SummaryComputation,
}

/// Show the annual summary
fn cmd_year(dir: &Path, year: i32, json: bool) -> Result<()> {
    let ctx = load_context(dir)?;
    let household = &ctx.household;
    let config = household.financial_config();

    let summary = build_annual_summary(
        &ctx.ledger.year_transactions(year),
        ctx.ledger.fixed_expenses(),
        year,
        &config,
    );

    if json {
        return print_json(&YearReport { year, summary });
    }

    let symbol = &household.currency_symbol;

    println!("Annual Summary {} - {}", year, household.name);
    print_table(vec![
        KpiRow {
            metric: "Total spent".to_string(),
            value: format_money(summary.total_spent, symbol),
        },
        KpiRow {
            metric: "Transactions".to_string(),
            value: summary.synced_logs.to_string(),
        },
    ]);

    println!();
    println!("Income commitment (12 months)");
    print_table(commitment_rows(&summary, household));

    println!();
    if summary.annual_categories.is_empty() {
        println!("No spending recorded for {}.", year);
    } else {
        println!("Categories");
        print_table(category_rows(&summary.annual_categories, symbol));
    }

    Ok(())
}

#[derive(Serialize)]
struct DailyReport {
    period: String,
    include_fixed: bool,
    series: Vec<DailyPoint>,
}

/// Show spend per day
fn cmd_daily(dir: &Path, period: MonthPeriod, include_fixed: bool, json: bool) -> Result<()> {
    let ctx = load_context(dir)?;
    let household = &ctx.household;

    let series = build_daily_series(
        &ctx.ledger.month_transactions(period),
        ctx.ledger.fixed_expenses(),
        period.days_in_month(),
        include_fixed,
        household.fixed_due_day,
    );

    if json {
        return print_json(&DailyReport {
            period: period.to_string(),
            include_fixed,
            series,
        });
    }

    let symbol = &household.currency_symbol;
    let total = series.iter().fold(0.0, |acc, point| acc + point.value);

    println!(
        "Daily Spend {} ({})",
        period,
        if include_fixed {
            "with fixed expenses"
        } else {
            "without fixed expenses"
        }
    );
    let rows: Vec<DayRow> = series
        .iter()
        .map(|point| DayRow {
            day: point.day,
            date: period
                .first_day()
                .with_day(point.day)
                .map(|d| d.format("%a").to_string())
                .unwrap_or_default(),
            value: format_money(point.value, symbol),
        })
        .collect();
    print_table(rows);
    println!("Total: {}", format_money(total, symbol));

    Ok(())
}

/// List fixed expenses
fn cmd_fixed(dir: &Path, period: MonthPeriod, json: bool) -> Result<()> {
    let ctx = load_context(dir)?;
    let household = &ctx.household;
    let due = due_date(period, household.fixed_due_day);
    let fixed: Vec<NextDueExpense> = ctx
        .ledger
        .fixed_expenses()
        .iter()
        .map(|expense| NextDueExpense {
            id: expense.id.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
            due_date: due,
        })
        .collect();

    if json {
        return print_json(&fixed);
    }

    if fixed.is_empty() {
        println!("No fixed expenses configured.");
        println!("Add fixed expenses to: {}/{}", dir.display(), FIXED_FILE);
        return Ok(());
    }

    let symbol = &household.currency_symbol;
    let rows: Vec<DueRow> = fixed
        .iter()
        .map(|expense| DueRow {
            id: expense.id.clone(),
            description: expense.description.clone(),
            amount: format_money(expense.amount, symbol),
            due: expense.due_date.format("%Y-%m-%d").to_string(),
        })
        .collect();
    print_table(rows);

    let monthly = fixed.iter().fold(0.0, |acc, expense| acc + expense.amount);
    println!(
        "Total: {} per month, {} per year",
        format_money(monthly, symbol),
        format_money(monthly * 12.0, symbol)
    );

    Ok(())
}
