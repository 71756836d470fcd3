use serde::Serialize;

use super::model::{CategoryBreakdown, SummaryComputation, FIXED_EXPENSES_CATEGORY};

/// A member committing more than this share of their income triggers an alert
pub const MEMBER_COMMITMENT_LIMIT: f64 = 50.0;

/// Combined commitment limit for the couple
pub const COMBINED_COMMITMENT_LIMIT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Nothing spent last month, something spent this month
    Returned,
    /// Spent last month, nothing this month
    Cleared,
    Increased,
    Decreased,
}

/// The category whose spend moved the most compared to the previous month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInsight {
    pub name: String,
    pub kind: InsightKind,
    pub percent_change: f64,
    pub previous: f64,
    pub current: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentSubject {
    MemberA,
    MemberB,
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommitmentAlert {
    pub subject: CommitmentSubject,
    pub percentage: f64,
    pub limit: f64,
}

fn variable_categories(breakdowns: &[CategoryBreakdown]) -> impl Iterator<Item = &CategoryBreakdown> {
    breakdowns
        .iter()
        .filter(|category| category.name != FIXED_EXPENSES_CATEGORY)
}

fn value_of(breakdowns: &[CategoryBreakdown], name: &str) -> f64 {
    variable_categories(breakdowns)
        .find(|category| category.name == name)
        .map(|category| category.value)
        .unwrap_or(0.0)
}

/// Compare two monthly category breakdowns and pick the largest relative move.
///
/// Fixed expenses are ignored. A category absent from one side counts as 0;
/// a move from 0 is reported as +/-100%. Ties keep the first category seen,
/// current month first.
pub fn category_insight(
    current: &[CategoryBreakdown],
    previous: &[CategoryBreakdown],
) -> Option<CategoryInsight> {
    let mut names: Vec<&str> = Vec::new();
    for category in variable_categories(current).chain(variable_categories(previous)) {
        if !names.contains(&category.name.as_str()) {
            names.push(&category.name);
        }
    }

    let mut selected: Option<CategoryInsight> = None;

    for name in names {
        let current_value = value_of(current, name);
        let previous_value = value_of(previous, name);
        let diff = current_value - previous_value;
        if diff == 0.0 {
            continue;
        }

        let percent_change = if previous_value == 0.0 {
            if current_value > 0.0 {
                100.0
            } else {
                -100.0
            }
        } else {
            diff / previous_value * 100.0
        };

        let replaces = selected
            .as_ref()
            .map_or(true, |s| percent_change.abs() > s.percent_change.abs());
        if !replaces {
            continue;
        }

        let kind = if previous_value == 0.0 && current_value > 0.0 {
            InsightKind::Returned
        } else if current_value == 0.0 && previous_value > 0.0 {
            InsightKind::Cleared
        } else if percent_change > 0.0 {
            InsightKind::Increased
        } else {
            InsightKind::Decreased
        };

        selected = Some(CategoryInsight {
            name: name.to_string(),
            kind,
            percent_change,
            previous: previous_value,
            current: current_value,
        });
    }

    selected
}

/// Income commitment percentages over their limits, member A first.
pub fn commitment_alerts(summary: &SummaryComputation) -> Vec<CommitmentAlert> {
    [
        (
            CommitmentSubject::MemberA,
            summary.income_commitment_member_a,
            MEMBER_COMMITMENT_LIMIT,
        ),
        (
            CommitmentSubject::MemberB,
            summary.income_commitment_member_b,
            MEMBER_COMMITMENT_LIMIT,
        ),
        (
            CommitmentSubject::Combined,
            summary.income_commitment_total,
            COMBINED_COMMITMENT_LIMIT,
        ),
    ]
    .into_iter()
    .filter(|(_, percentage, limit)| percentage > limit)
    .map(|(subject, percentage, limit)| CommitmentAlert {
        subject,
        percentage,
        limit,
    })
    .collect()
}
