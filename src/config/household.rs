use serde::{Deserialize, Serialize};

use crate::error::{HouseholdError, Result};
use crate::summary::{FinancialConfig, DEFAULT_DUE_DAY};

/// Label for member A, who is always the member running the tool
pub const CURRENT_MEMBER_LABEL: &str = "You";

/// Label for member B when no partner is configured
pub const PARTNER_LABEL: &str = "Partner";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HouseholdConfig {
    pub name: String,
    #[serde(default = "default_due_day")]
    pub fixed_due_day: u32,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Member {
    pub name: String,
    pub share_ratio: f64,
    /// Monthly income
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub current: bool,
}

fn default_due_day() -> u32 {
    DEFAULT_DUE_DAY
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

impl HouseholdConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=31).contains(&self.fixed_due_day) {
            return Err(HouseholdError::InvalidDueDay(self.fixed_due_day));
        }

        if self.members.len() > 2 {
            return Err(HouseholdError::TooManyMembers(self.members.len()));
        }

        let current = self.members.iter().filter(|m| m.current).count();
        if current > 1 {
            return Err(HouseholdError::MultipleCurrentMembers(current));
        }

        for member in &self.members {
            if !(0.0..=1.0).contains(&member.share_ratio) {
                return Err(HouseholdError::InvalidShare {
                    member: member.name.clone(),
                    ratio: member.share_ratio,
                });
            }
            if member.income < 0.0 {
                return Err(HouseholdError::NegativeIncome {
                    member: member.name.clone(),
                    income: member.income,
                });
            }
        }

        Ok(())
    }

    /// Member A
    pub fn current_member(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.current)
    }

    /// Member B: the first member who isn't the current one
    pub fn partner(&self) -> Option<&Member> {
        self.members.iter().find(|m| !m.current)
    }

    /// Shares and incomes for the summary engine.
    ///
    /// Without a current member there's nobody to call member A, so the
    /// default 50/50 split with no income is used.
    pub fn financial_config(&self) -> FinancialConfig {
        let Some(current) = self.current_member() else {
            return FinancialConfig::default();
        };
        let partner = self.partner();

        FinancialConfig {
            share_member_a: current.share_ratio,
            share_member_b: partner.map_or(0.5, |p| p.share_ratio),
            income_member_a: current.income,
            income_member_b: partner.map_or(0.0, |p| p.income),
        }
    }

    pub fn member_a_label(&self) -> &str {
        CURRENT_MEMBER_LABEL
    }

    pub fn member_b_label(&self) -> &str {
        self.partner().map_or(PARTNER_LABEL, |p| p.name.as_str())
    }
}
