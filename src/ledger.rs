use chrono::Datelike;
use tracing::warn;

use crate::config::{FixedExpenseRecord, TransactionRecord};
use crate::summary::{parse_iso_date, FixedExpense, MonthPeriod, Transaction};

/// Normalized household records, ready for the summary engine
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    fixed_expenses: Vec<FixedExpense>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>, fixed_expenses: Vec<FixedExpense>) -> Self {
        Self {
            transactions,
            fixed_expenses,
        }
    }

    /// Resolve optional fields and parse dates once, at load time.
    pub fn from_records(
        transactions: &[TransactionRecord],
        fixed_expenses: &[FixedExpenseRecord],
    ) -> Self {
        let transactions = transactions
            .iter()
            .map(|record| {
                let date = parse_iso_date(&record.date);
                if date.is_none() {
                    warn!(
                        id = record.id.as_deref().unwrap_or("-"),
                        date = %record.date,
                        "Skipping unparseable transaction date"
                    );
                }
                Transaction::new(date, record.total_amount, record.category.as_deref())
            })
            .collect();

        let fixed_expenses = fixed_expenses
            .iter()
            .map(|record| FixedExpense {
                id: record.id.clone(),
                description: record.description.clone(),
                amount: record.amount,
            })
            .collect();

        Self::new(transactions, fixed_expenses)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn fixed_expenses(&self) -> &[FixedExpense] {
        &self.fixed_expenses
    }

    /// Transactions dated within `period`. Undated transactions never match.
    pub fn month_transactions(&self, period: MonthPeriod) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.date.is_some_and(|date| period.contains(date)))
            .cloned()
            .collect()
    }

    /// Transactions dated within the calendar year
    pub fn year_transactions(&self, year: i32) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.date.is_some_and(|date| date.year() == year))
            .cloned()
            .collect()
    }

    pub fn undated_count(&self) -> usize {
        self.transactions.iter().filter(|t| t.date.is_none()).count()
    }
}
