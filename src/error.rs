use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HouseholdError {
    #[error("Data directory not found at {0}. Run 'household init' to create it.")]
    DataDirNotFound(PathBuf),

    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    #[error("Failed to parse data file {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid month '{0}'. Expected a value between 1 and 12.")]
    InvalidMonth(u32),

    #[error("Invalid year {0}. It is outside the supported date range.")]
    InvalidYear(i32),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Invalid fixed_due_day {0}. Expected a day of month between 1 and 31.")]
    InvalidDueDay(u32),

    #[error("Invalid share_ratio {ratio} for member '{member}': must be between 0 and 1")]
    InvalidShare { member: String, ratio: f64 },

    #[error("Invalid income {income} for member '{member}': must not be negative")]
    NegativeIncome { member: String, income: f64 },

    #[error("A household has at most two members ({0} configured)")]
    TooManyMembers(usize),

    #[error("Only one member can be marked as current ({0} marked)")]
    MultipleCurrentMembers(usize),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HouseholdError>;
