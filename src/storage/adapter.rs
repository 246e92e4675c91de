use tracing::{debug, warn};

use crate::{
    currency::CurrencyCode,
    errors::Result,
    expense::Expense,
};

use super::{keys, KeyValueStore};

/// State restored at start-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub currency: CurrencyCode,
}

/// Reads and writes the expense collection and currency under their fixed
/// keys. Missing or unreadable values fall back to defaults on load.
pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    default_currency: CurrencyCode,
}

impl PersistenceAdapter {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            default_currency: CurrencyCode::default(),
        }
    }

    /// Overrides the currency reported when none is stored.
    pub fn with_default_currency(mut self, currency: CurrencyCode) -> Self {
        self.default_currency = currency;
        self
    }

    pub fn load(&self) -> Snapshot {
        Snapshot {
            expenses: self.load_expenses(),
            currency: self.load_currency(),
        }
    }

    pub fn load_expenses(&self) -> Vec<Expense> {
        let raw = match self.store.get(keys::EXPENSES) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read stored expenses; starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Expense>>(&raw) {
            Ok(expenses) => {
                debug!(count = expenses.len(), "loaded expenses");
                expenses
            }
            Err(err) => {
                warn!(error = %err, "stored expenses are not valid JSON; starting empty");
                Vec::new()
            }
        }
    }

    /// The currency key holds a bare code, not JSON.
    pub fn load_currency(&self) -> CurrencyCode {
        match self.store.get(keys::CURRENCY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => CurrencyCode::new(raw),
            Ok(_) => self.default_currency.clone(),
            Err(err) => {
                warn!(error = %err, "failed to read stored currency; using default");
                self.default_currency.clone()
            }
        }
    }

    /// Replaces the stored collection with `expenses`.
    pub fn save(&self, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string(expenses)?;
        self.store.set(keys::EXPENSES, &json)?;
        debug!(count = expenses.len(), "saved expenses");
        Ok(())
    }

    pub fn save_currency(&self, currency: &CurrencyCode) -> Result<()> {
        self.store.set(keys::CURRENCY, currency.as_str())?;
        debug!(currency = %currency, "saved currency");
        Ok(())
    }

    /// Removes both keys.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(keys::EXPENSES)?;
        self.store.remove(keys::CURRENCY)
    }
}
