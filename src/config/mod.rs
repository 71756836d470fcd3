mod household;
mod records;

pub use household::{HouseholdConfig, Member, CURRENT_MEMBER_LABEL, PARTNER_LABEL};
pub use records::{FixedExpenseRecord, FixedExpensesFile, TransactionRecord, TransactionsFile};

use crate::error::{HouseholdError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOUSEHOLD_FILE: &str = "household.toml";
pub const TRANSACTIONS_FILE: &str = "transactions.toml";
pub const FIXED_FILE: &str = "fixed.toml";

/// Get the data directory path (XDG config dir, or ~/.household/)
pub fn data_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "household") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.household/
    let home = dirs_home().ok_or_else(|| {
        HouseholdError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".household"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn read_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    debug!(path = %path.display(), "Reading data file");
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| HouseholdError::DataParse { path, source: e })
}

/// Load and validate household.toml
pub fn load_household(data_dir: &Path) -> Result<HouseholdConfig> {
    let path = data_dir.join(HOUSEHOLD_FILE);
    if !path.exists() {
        return Err(HouseholdError::DataFileNotFound(path));
    }
    let household: HouseholdConfig = read_toml(path)?;
    household.validate()?;
    Ok(household)
}

/// Load transactions.toml (empty if missing)
pub fn load_transactions(data_dir: &Path) -> Result<Vec<TransactionRecord>> {
    let path = data_dir.join(TRANSACTIONS_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file: TransactionsFile = read_toml(path)?;
    Ok(file.transactions)
}

/// Load fixed.toml (empty if missing)
pub fn load_fixed_expenses(data_dir: &Path) -> Result<Vec<FixedExpenseRecord>> {
    let path = data_dir.join(FIXED_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file: FixedExpensesFile = read_toml(path)?;
    Ok(file.fixed_expenses)
}

/// Template content for household.toml
pub const HOUSEHOLD_TEMPLATE: &str = r#"name = "Our Home"
fixed_due_day = 5          # day of month every fixed expense is due (1-31)
currency_symbol = "R$"

# Up to two members. The one marked `current = true` is "You" (member A).
[[members]]
name = "Ana"
share_ratio = 0.5          # fraction of the household spend (0-1)
income = 5000.00           # monthly income
current = true

[[members]]
name = "Bruno"
share_ratio = 0.5
income = 4000.00
"#;

/// Template content for transactions.toml
pub const TRANSACTIONS_TEMPLATE: &str = r#"# Variable expenses. Dates are quoted ISO dates (YYYY-MM-DD).
# A missing category is reported as "Outros".

[[transactions]]
id = "tx-1"
date = "2026-01-10"
total_amount = 250.00
category = "alimentação"
description = "Weekly groceries"
payment_method = "credit"
is_shared = true
"#;

/// Template content for fixed.toml
pub const FIXED_TEMPLATE: &str = r#"# Recurring monthly charges. All of them fall due on the household's
# fixed_due_day.

[[fixed_expenses]]
id = "rent"
description = "Rent"
amount = 1800.00

[[fixed_expenses]]
id = "internet"
description = "Internet"
amount = 120.00
"#;
