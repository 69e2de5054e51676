#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use finance_core::domain::{TransactionRecord, TransactionType};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn income(id: &str, amount: &str, date: &str) -> TransactionRecord {
    TransactionRecord::new(id, "Salary", amount, TransactionType::Positive, "salary", date)
}

pub fn expense(id: &str, amount: &str, category: &str, date: &str) -> TransactionRecord {
    TransactionRecord::new(id, "Expense", amount, TransactionType::Negative, category, date)
}
