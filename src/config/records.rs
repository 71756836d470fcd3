use serde::{Deserialize, Serialize};

/// A row of transactions.toml, as written by the user
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<String>,
    /// ISO date, e.g. "2024-02-10"
    pub date: String,
    pub total_amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub is_shared: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct TransactionsFile {
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

/// A row of fixed.toml
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FixedExpenseRecord {
    pub id: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct FixedExpensesFile {
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpenseRecord>,
}
