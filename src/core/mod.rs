pub mod summary;
pub mod tracker;

pub use summary::{
    category_totals, percent_of_total, recent_expenses, time_window_totals, total_amount,
    CategoryTotal, Summary, SummaryOptions, TimeWindowTotals,
};
pub use tracker::{ExpenseTracker, Mutation};
