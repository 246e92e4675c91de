use chrono::{DateTime, TimeZone};
use tracing::{error, info};

use crate::currency::CurrencyCode;
use crate::expense::{Expense, ExpenseDraft, ExpenseId, FieldErrors};
use crate::storage::{PersistenceAdapter, Snapshot};

use super::summary::{Summary, SummaryOptions};

/// Outcome of a mutation addressed to an existing expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// No expense carries the id; nothing changed and nothing was saved.
    NotFound,
}

/// Sole owner of the expense collection. Every applied mutation is followed
/// by exactly one save of the full collection.
pub struct ExpenseTracker {
    expenses: Vec<Expense>,
    currency: CurrencyCode,
    persistence: PersistenceAdapter,
}

impl ExpenseTracker {
    /// Restores state from `persistence`, falling back to an empty collection.
    pub fn open(persistence: PersistenceAdapter) -> Self {
        let Snapshot { expenses, currency } = persistence.load();
        info!(count = expenses.len(), currency = %currency, "expense tracker opened");
        Self {
            expenses,
            currency,
            persistence,
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Validates and appends a new expense, returning its minted id.
    pub fn add(&mut self, draft: ExpenseDraft) -> Result<ExpenseId, FieldErrors> {
        let expense = draft.validate(None)?;
        let id = expense.id.clone();
        info!(id = %id, amount = expense.amount, category = %expense.category, "expense added");
        self.expenses.push(expense);
        self.persist();
        Ok(id)
    }

    /// Replaces the expense with `id` in place. Unknown ids are ignored.
    pub fn update(
        &mut self,
        id: &ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Mutation, FieldErrors> {
        let updated = draft.validate(Some(id.clone()))?;
        let Some(slot) = self.expenses.iter_mut().find(|expense| &expense.id == id) else {
            info!(id = %id, "update ignored; no such expense");
            return Ok(Mutation::NotFound);
        };
        *slot = updated;
        info!(id = %id, "expense updated");
        self.persist();
        Ok(Mutation::Applied)
    }

    pub fn remove(&mut self, id: &ExpenseId) -> Mutation {
        let before = self.expenses.len();
        self.expenses.retain(|expense| &expense.id != id);
        if self.expenses.len() == before {
            info!(id = %id, "remove ignored; no such expense");
            return Mutation::NotFound;
        }
        info!(id = %id, "expense removed");
        self.persist();
        Mutation::Applied
    }

    /// Expenses whose description or category contains `filter`, ignoring
    /// case. `None` or an empty filter lists everything.
    pub fn list(&self, filter: Option<&str>) -> Vec<&Expense> {
        match filter {
            Some(term) if !term.is_empty() => self
                .expenses
                .iter()
                .filter(|expense| expense.matches(term))
                .collect(),
            _ => self.expenses.iter().collect(),
        }
    }

    pub fn set_currency(&mut self, currency: CurrencyCode) {
        info!(from = %self.currency, to = %currency, "currency changed");
        self.currency = currency;
        if let Err(err) = self.persistence.save_currency(&self.currency) {
            error!(error = %err, "failed to persist currency");
        }
    }

    pub fn summary<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        options: SummaryOptions,
    ) -> Summary<'_> {
        Summary::compute(&self.expenses, now, options)
    }

    /// Saves are fire-and-forget; in-memory state stays authoritative.
    fn persist(&self) {
        if let Err(err) = self.persistence.save(&self.expenses) {
            error!(error = %err, count = self.expenses.len(), "failed to persist expenses");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{keys, KeyValueStore, MemoryStore};
    use chrono::{TimeZone, Utc};

    fn draft(description: &str, amount: &str, category: &str) -> ExpenseDraft {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        ExpenseDraft::new(description, amount, category, Some(date))
    }

    fn tracker() -> (ExpenseTracker, MemoryStore) {
        let store = MemoryStore::new();
        let tracker = ExpenseTracker::open(PersistenceAdapter::new(store.clone()));
        (tracker, store)
    }

    #[test]
    fn add_appends_and_saves_once() {
        let (mut tracker, store) = tracker();
        let id = tracker.add(draft("Hotel", "150.00", "Accommodation")).unwrap();
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.get(&id).map(|e| e.amount), Some(150.0));
        assert_eq!(store.write_count(), 1);
        let stored = store.get(keys::EXPENSES).unwrap().unwrap();
        assert!(stored.contains("\"Hotel\""));
    }

    #[test]
    fn invalid_draft_leaves_collection_untouched() {
        let (mut tracker, store) = tracker();
        let errors = tracker.add(draft("Taxi", "-5", "Transportation")).unwrap_err();
        assert!(errors.amount);
        assert!(tracker.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn update_replaces_in_place() {
        let (mut tracker, store) = tracker();
        let first = tracker.add(draft("Hotel", "150", "Accommodation")).unwrap();
        tracker.add(draft("Pizza", "12", "Food")).unwrap();
        let outcome = tracker
            .update(&first, draft("Hotel (2 nights)", "300", "Accommodation"))
            .unwrap();
        assert_eq!(outcome, Mutation::Applied);
        assert_eq!(tracker.expenses()[0].id, first);
        assert_eq!(tracker.expenses()[0].amount, 300.0);
        assert_eq!(store.write_count(), 3);
    }

    #[test]
    fn update_of_unknown_id_is_a_quiet_no_op() {
        let (mut tracker, store) = tracker();
        tracker.add(draft("Hotel", "150", "Accommodation")).unwrap();
        let before = tracker.expenses().to_vec();
        let outcome = tracker
            .update(&ExpenseId::from("missing"), draft("Ghost", "1", "Other"))
            .unwrap();
        assert_eq!(outcome, Mutation::NotFound);
        assert_eq!(tracker.expenses(), before.as_slice());
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn update_validates_before_lookup() {
        let (mut tracker, _store) = tracker();
        let errors = tracker
            .update(&ExpenseId::from("missing"), draft("", "1", "Other"))
            .unwrap_err();
        assert!(errors.description);
    }

    #[test]
    fn remove_unknown_id_changes_nothing() {
        let (mut tracker, store) = tracker();
        tracker.add(draft("Hotel", "150", "Accommodation")).unwrap();
        assert_eq!(tracker.remove(&ExpenseId::from("nope")), Mutation::NotFound);
        assert_eq!(tracker.len(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn remove_deletes_and_saves() {
        let (mut tracker, store) = tracker();
        let id = tracker.add(draft("Hotel", "150", "Accommodation")).unwrap();
        assert_eq!(tracker.remove(&id), Mutation::Applied);
        assert!(tracker.is_empty());
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get(keys::EXPENSES).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn list_filters_on_description_or_category() {
        let (mut tracker, store) = tracker();
        tracker.add(draft("Hotel", "150", "Accommodation")).unwrap();
        tracker.add(draft("Street food", "8", "Food")).unwrap();
        tracker.add(draft("Ferry", "30", "Transportation")).unwrap();
        let writes = store.write_count();

        assert_eq!(tracker.list(None).len(), 3);
        assert_eq!(tracker.list(Some("")).len(), 3);
        let food: Vec<&str> = tracker
            .list(Some("FOOD"))
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(food, vec!["Street food"]);
        assert_eq!(tracker.list(Some("ation")).len(), 2);
        assert!(tracker.list(Some("museum")).is_empty());
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn currency_change_is_persisted_separately() {
        let (mut tracker, store) = tracker();
        assert_eq!(tracker.currency().as_str(), "USD");
        tracker.set_currency(CurrencyCode::new("EUR"));
        assert_eq!(store.get(keys::CURRENCY).unwrap().as_deref(), Some("EUR"));
        assert_eq!(store.get(keys::EXPENSES).unwrap(), None);

        let reopened = ExpenseTracker::open(PersistenceAdapter::new(store));
        assert_eq!(reopened.currency().as_str(), "EUR");
    }
}
