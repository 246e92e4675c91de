use chrono::{DateTime, Utc};
use serde::Serialize;

use super::record::{Expense, ExpenseId};

/// Raw form input for creating or editing an expense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    /// Amount exactly as typed.
    pub amount: String,
    pub category: String,
    pub date: Option<DateTime<Utc>>,
}

impl ExpenseDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            date,
        }
    }

    /// Prefills a draft from a stored expense, as an edit form would.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.clone(),
            date: Some(expense.date),
        }
    }

    /// Evaluates every field rule and reports each violation.
    pub fn check(&self) -> FieldErrors {
        FieldErrors {
            description: self.description.trim().is_empty(),
            amount: parse_amount(&self.amount).is_none(),
            category: self.category.trim().is_empty(),
            date: self.date.is_none(),
        }
    }

    /// Builds a typed expense, minting a new id unless `id` is supplied.
    pub fn validate(self, id: Option<ExpenseId>) -> Result<Expense, FieldErrors> {
        let errors = self.check();
        match (parse_amount(&self.amount), self.date) {
            (Some(amount), Some(date)) if errors.is_empty() => Ok(Expense {
                id: id.unwrap_or_else(ExpenseId::mint),
                description: self.description,
                amount,
                category: self.category,
                date,
            }),
            _ => Err(errors),
        }
    }
}

/// Accepts finite, strictly positive numbers with optional surrounding blanks.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

const FIELD_MESSAGES: [(&str, &str); 4] = [
    ("description", "Description is required"),
    ("amount", "Please enter a valid amount"),
    ("category", "Category is required"),
    ("date", "Date is required"),
];

/// One flag per violated field rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", joined_messages([.description, .amount, .category, .date]))]
pub struct FieldErrors {
    pub description: bool,
    pub amount: bool,
    pub category: bool,
    pub date: bool,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        !(self.description || self.amount || self.category || self.date)
    }

    /// User-facing message for each flagged field, in form order.
    pub fn messages(&self) -> Vec<(&'static str, &'static str)> {
        flagged([&self.description, &self.amount, &self.category, &self.date]).collect()
    }
}

fn flagged(flags: [&bool; 4]) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
    FIELD_MESSAGES
        .into_iter()
        .zip(flags)
        .filter_map(|(entry, flag)| flag.then_some(entry))
}

fn joined_messages(flags: [&bool; 4]) -> String {
    flagged(flags).map(|(_, message)| message).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn june_first() -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn negative_amount_flags_only_amount() {
        let errors = ExpenseDraft::new("Taxi", "-5", "Transportation", june_first())
            .validate(None)
            .unwrap_err();
        assert_eq!(
            errors,
            FieldErrors {
                amount: true,
                ..FieldErrors::default()
            }
        );
    }

    #[test]
    fn every_broken_field_is_reported() {
        let errors = ExpenseDraft::new("   ", "abc", "", None)
            .validate(None)
            .unwrap_err();
        assert!(errors.description && errors.amount && errors.category && errors.date);
        assert_eq!(errors.messages().len(), 4);
        assert!(errors.to_string().starts_with("Description is required"));
    }

    #[test]
    fn display_joins_flagged_messages_in_form_order() {
        let errors = FieldErrors {
            date: true,
            amount: true,
            ..FieldErrors::default()
        };
        assert_eq!(errors.to_string(), "Please enter a valid amount; Date is required");
        let as_error: &dyn std::error::Error = &errors;
        assert!(as_error.source().is_none());
        assert_eq!(FieldErrors::default().to_string(), "");
    }

    #[test]
    fn amount_rules() {
        assert_eq!(parse_amount(" 12.50 "), Some(12.5));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn supplied_id_is_kept() {
        let id = ExpenseId::from("existing");
        let expense = ExpenseDraft::new("Dinner", "42", "Food", june_first())
            .validate(Some(id.clone()))
            .unwrap();
        assert_eq!(expense.id, id);
        assert_eq!(expense.amount, 42.0);
    }

    #[test]
    fn draft_from_expense_validates_back_to_same_record() {
        let original = ExpenseDraft::new("Museum", "17.25", "Activities", june_first())
            .validate(None)
            .unwrap();
        let again = ExpenseDraft::from_expense(&original)
            .validate(Some(original.id.clone()))
            .unwrap();
        assert_eq!(again, original);
    }
}
