//! Expense records, categories, and form validation.

pub mod category;
pub mod draft;
pub mod record;

pub use category::{Category, CategoryColor};
pub use draft::{parse_amount, ExpenseDraft, FieldErrors};
pub use record::{format_timestamp, parse_timestamp, parse_timestamp_in, Expense, ExpenseId};
