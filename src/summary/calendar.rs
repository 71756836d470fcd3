use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;
use std::fmt;

/// A calendar month. Always holds a valid first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthPeriod {
    first_day: NaiveDate,
}

impl MonthPeriod {
    /// Returns `None` when `month` is outside 1..=12 or the year is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// The month before this one (January rolls back to December)
    pub fn previous(&self) -> Option<Self> {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| Self { first_day })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Sortable key, `year * 12 + month`
    fn key(&self) -> i64 {
        i64::from(self.year()) * 12 + i64::from(self.month())
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Gregorian day count for a month. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        return 31;
    }
    month
        .checked_add(1)
        .and_then(|next_month| NaiveDate::from_ymd_opt(year, next_month, 1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Days of `period` counted for the daily average, relative to `today`.
///
/// A past month counts every day, the current month counts up to today and a
/// future month counts a single day. The result is clamped to `1..=days_in_month`.
pub fn days_elapsed(period: MonthPeriod, today: NaiveDate) -> u32 {
    let days = period.days_in_month();
    let current = MonthPeriod::containing(today);

    let elapsed = match period.key().cmp(&current.key()) {
        std::cmp::Ordering::Less => days,
        std::cmp::Ordering::Equal => days.min(today.day()),
        std::cmp::Ordering::Greater => 1,
    };

    elapsed.clamp(1, days.max(1))
}

/// Weekdays (Monday to Friday) in the month
pub fn count_business_days(period: MonthPeriod) -> u32 {
    period
        .first_day()
        .iter_days()
        .take(period.days_in_month() as usize)
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u32
}

/// Due day clamped into the month, so 31 falls on the 30th in April.
pub fn clamp_due_day(fixed_due_day: u32, days_in_month: u32) -> u32 {
    fixed_due_day.min(days_in_month).max(1)
}

/// Midnight of the (clamped) due day within `period`
pub fn due_date(period: MonthPeriod, fixed_due_day: u32) -> NaiveDateTime {
    let day = clamp_due_day(fixed_due_day, period.days_in_month());
    period
        .first_day()
        .with_day(day)
        .unwrap_or_else(|| period.first_day())
        .and_time(NaiveTime::MIN)
}
