//! Local key-value persistence for the expense collection and currency.

pub mod adapter;
pub mod file_store;
pub mod memory_store;

use crate::errors::Result;

/// Fixed keys under which state is persisted.
pub mod keys {
    pub const EXPENSES: &str = "vacationExpenses";
    pub const CURRENCY: &str = "vacationCurrency";
}

/// Opaque string-keyed store. Each key is replaced atomically; there is no
/// transaction spanning several keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

pub use adapter::{PersistenceAdapter, Snapshot};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
