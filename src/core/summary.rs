//! Derived totals over the expense collection. Everything here is a pure
//! function of its inputs and is recomputed on every call.

use std::{cmp::Ordering, collections::HashMap};

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};
use serde::Serialize;

use crate::{
    config::{Config, DEFAULT_RECENT_LIMIT},
    expense::{Category, CategoryColor, Expense},
};

/// Sum of all amounts recorded under one category label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub color: CategoryColor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TimeWindowTotals {
    pub today: f64,
    pub this_week: f64,
    pub this_month: f64,
}

pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().fold(0.0, |sum, expense| sum + expense.amount)
}

/// Groups by exact category label and sorts by total, largest first. Equal
/// totals keep the order in which their category first appeared.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match index.get(expense.category.as_str()) {
            Some(&slot) => totals[slot].total += expense.amount,
            None => {
                index.insert(expense.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                    color: Category::color_for(&expense.category),
                });
            }
        }
    }

    totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    totals
}

/// Totals for the calendar day, week and month containing `now`, judged in
/// `now`'s time zone. Weeks begin on `week_start`.
pub fn time_window_totals<Tz: TimeZone>(
    expenses: &[Expense],
    now: &DateTime<Tz>,
    week_start: Weekday,
) -> TimeWindowTotals {
    let zone = now.timezone();
    let today = now.date_naive();
    let this_week = start_of_week(today, week_start);

    expenses
        .iter()
        .fold(TimeWindowTotals::default(), |mut totals, expense| {
            let day = expense.date.with_timezone(&zone).date_naive();
            if day == today {
                totals.today += expense.amount;
            }
            if start_of_week(day, week_start) == this_week {
                totals.this_week += expense.amount;
            }
            if day.year() == today.year() && day.month() == today.month() {
                totals.this_month += expense.amount;
            }
            totals
        })
}

pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset =
        (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(date)
}

/// Whole-number share of `total`; zero when there is nothing to divide by.
pub fn percent_of_total(category_total: &CategoryTotal, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    let percent = (100.0 * category_total.total / total).round();
    if percent.is_finite() {
        percent
    } else {
        0.0
    }
}

/// The `limit` latest expenses by date, newest first.
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<&Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub week_start: Weekday,
    pub recent_limit: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl From<&Config> for SummaryOptions {
    fn from(config: &Config) -> Self {
        Self {
            week_start: config.week_start,
            recent_limit: config.recent_limit,
        }
    }
}

/// Everything the summary view renders, computed in one pass over a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    pub total: f64,
    pub windows: TimeWindowTotals,
    pub by_category: Vec<CategoryTotal>,
    pub recent: Vec<&'a Expense>,
}

impl<'a> Summary<'a> {
    pub fn compute<Tz: TimeZone>(
        expenses: &'a [Expense],
        now: &DateTime<Tz>,
        options: SummaryOptions,
    ) -> Self {
        Self {
            total: total_amount(expenses),
            windows: time_window_totals(expenses, now, options.week_start),
            by_category: category_totals(expenses),
            recent: recent_expenses(expenses, options.recent_limit),
        }
    }

    pub fn percent(&self, category_total: &CategoryTotal) -> f64 {
        percent_of_total(category_total, self.total)
    }
}
