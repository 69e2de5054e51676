use std::{collections::HashMap, sync::RwLock};

use crate::{
    domain::TransactionRecord,
    errors::{FinanceError, Result},
};

use super::TransactionStore;

/// Process-local store, handy for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<TransactionRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records` under `key`.
    pub fn with_records(key: &str, records: Vec<TransactionRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.to_string(), records);
        }
        store
    }
}

impl TransactionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<TransactionRecord>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| FinanceError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, records: &[TransactionRecord]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| FinanceError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), records.to_vec());
        Ok(())
    }
}
