pub mod json_backend;
pub mod memory;

use crate::{domain::TransactionRecord, errors::Result};

/// Namespaced key under which the transaction list is persisted.
pub const TRANSACTIONS_KEY: &str = "@gofinances:transactions";

/// Key-value persistence for transaction lists.
///
/// Implementations own retries and I/O policy; callers treat every error as a
/// recoverable failure of a single read or write.
pub trait TransactionStore: Send + Sync {
    /// Returns the list stored under `key`, or `None` when nothing was stored yet.
    fn get(&self, key: &str) -> Result<Option<Vec<TransactionRecord>>>;

    /// Replaces the list stored under `key`.
    fn set(&self, key: &str, records: &[TransactionRecord]) -> Result<()>;
}

/// Reads the transaction list, treating an absent key as an empty list.
pub fn load_transactions(store: &dyn TransactionStore) -> Result<Vec<TransactionRecord>> {
    let records = store.get(TRANSACTIONS_KEY)?.unwrap_or_default();
    tracing::debug!(count = records.len(), "loaded transactions");
    Ok(records)
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
