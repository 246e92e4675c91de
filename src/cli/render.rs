//! Plain-text views of the expense table and summary.

use std::fmt::Write;

use chrono::{DateTime, TimeZone, Utc};
use colored::{ColoredString, Colorize};

use crate::{
    core::Summary,
    currency::{format_money, CurrencyCode},
    expense::{Category, CategoryColor, Expense},
};

pub const EMPTY_COLLECTION: &str = "Add your first expense to get started";
pub const NO_MATCHES: &str = "No expenses match your search criteria";
pub const NO_SUMMARY_DATA: &str = "No expense data available";

/// Calendar day in `zone`, e.g. `Jun 1, 2024`.
pub fn display_date<Tz: TimeZone>(date: &DateTime<Utc>, zone: &Tz) -> String {
    date.with_timezone(zone)
        .date_naive()
        .format("%b %-d, %Y")
        .to_string()
}

pub fn paint(text: &str, color: CategoryColor) -> ColoredString {
    match color {
        CategoryColor::Blue => text.blue(),
        CategoryColor::Green => text.green(),
        CategoryColor::Yellow => text.yellow(),
        CategoryColor::Purple => text.magenta(),
        CategoryColor::Pink => text.bright_magenta(),
        CategoryColor::Gray => text.bright_black(),
    }
}

/// Renders the expense table, or the matching empty-state message.
pub fn expense_table<Tz: TimeZone>(
    rows: &[&Expense],
    collection_is_empty: bool,
    currency: &CurrencyCode,
    zone: &Tz,
) -> String {
    if rows.is_empty() {
        return if collection_is_empty {
            EMPTY_COLLECTION.to_string()
        } else {
            NO_MATCHES.to_string()
        };
    }

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|expense| {
            [
                display_date(&expense.date, zone),
                expense.description.clone(),
                expense.category.clone(),
                format_money(expense.amount, currency),
                expense.id.to_string(),
            ]
        })
        .collect();
    let headers = ["Date", "Description", "Category", "Amount", "Id"];
    let mut widths = headers.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<w0$}  {:<w1$}  {:<w2$}  {:>w3$}  {}",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        headers[4],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    );
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let _ = writeln!(out, "{}", "-".repeat(rule_len));
    for (row, expense) in cells.iter().zip(rows) {
        let category = format!("{:<w$}", row[2], w = widths[2]);
        let _ = writeln!(
            out,
            "{:<w0$}  {:<w1$}  {}  {:>w3$}  {}",
            row[0],
            row[1],
            paint(&category, expense.color()),
            row[3],
            row[4],
            w0 = widths[0],
            w1 = widths[1],
            w3 = widths[3],
        );
    }
    out.trim_end().to_string()
}

pub fn summary_report<Tz: TimeZone>(
    summary: &Summary<'_>,
    currency: &CurrencyCode,
    zone: &Tz,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total expenses: {}", format_money(summary.total, currency));
    let _ = writeln!(
        out,
        "Today: {} | This week: {} | This month: {}",
        format_money(summary.windows.today, currency),
        format_money(summary.windows.this_week, currency),
        format_money(summary.windows.this_month, currency),
    );

    let _ = writeln!(out, "\nExpenses by category");
    if summary.by_category.is_empty() {
        let _ = writeln!(out, "{NO_SUMMARY_DATA}");
        return out.trim_end().to_string();
    }
    let label_width = summary
        .by_category
        .iter()
        .map(|item| item.category.chars().count())
        .max()
        .unwrap_or(0);
    for item in &summary.by_category {
        let label = format!("{:<label_width$}", item.category);
        let _ = writeln!(
            out,
            "  {}  {:>14}  {:>4}%",
            paint(&label, item.color),
            format_money(item.total, currency),
            summary.percent(item),
        );
    }

    let _ = writeln!(out, "\nRecent expenses");
    for expense in &summary.recent {
        let _ = writeln!(
            out,
            "  {}  {}  {}  {}",
            display_date(&expense.date, zone),
            expense.description,
            paint(&expense.category, expense.color()),
            format_money(expense.amount, currency),
        );
    }
    out.trim_end().to_string()
}

/// One line per built-in category with its accent applied.
pub fn category_legend() -> String {
    Category::ALL
        .iter()
        .map(|category| {
            format!(
                "  {} ({})",
                paint(category.label(), category.color()),
                category.color().css_class()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
