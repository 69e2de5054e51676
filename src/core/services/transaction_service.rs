//! Normalizes raw transaction records for display and registers new ones.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::core::time::Clock;
use crate::currency::Formatter;
use crate::domain::transaction::partition_records;
use crate::domain::{Category, ParsedRecord, TransactionRecord, TransactionType};
use crate::errors::RecordError;
use crate::storage::{load_transactions, TransactionStore, TRANSACTIONS_KEY};

/// A record prepared for list rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub kind: TransactionType,
    pub category: String,
}

/// Sums of amounts split by direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningTotals {
    pub entries: f64,
    pub expenses: f64,
}

impl RunningTotals {
    pub fn add(&mut self, kind: TransactionType, amount: f64) {
        match kind {
            TransactionType::Positive => self.entries += amount,
            TransactionType::Negative => self.expenses += amount,
        }
    }

    /// Entries minus expenses; negative when spending exceeds income.
    pub fn net(&self) -> f64 {
        self.entries - self.expenses
    }
}

/// Output of a normalization pass over the full record list.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTransactions {
    pub transactions: Vec<TransactionView>,
    pub totals: RunningTotals,
    /// Records left out of the totals because they failed to parse.
    pub skipped: Vec<RecordError>,
}

/// Unvalidated input for a new transaction.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: String,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        kind: TransactionType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            kind: Some(kind),
            category: Some(category.into()),
        }
    }
}

/// Provides the normalization pass and validated registration of transactions.
pub struct TransactionService;

impl TransactionService {
    /// Formats every well-formed record and accumulates direction totals.
    ///
    /// Malformed records are skipped, logged, and reported in `skipped`.
    pub fn normalize(records: &[TransactionRecord], formatter: &Formatter) -> NormalizedTransactions {
        let (parsed, skipped) = partition_records(records, formatter.zone);
        for err in &skipped {
            tracing::warn!(record = err.record_id(), "skipping transaction: {err}");
        }

        let mut totals = RunningTotals::default();
        let transactions = parsed
            .iter()
            .map(|entry| {
                totals.add(entry.kind(), entry.amount);
                Self::view(entry, formatter)
            })
            .collect();

        NormalizedTransactions {
            transactions,
            totals,
            skipped,
        }
    }

    /// Like [`TransactionService::normalize`] but fails on the first malformed record.
    pub fn normalize_strict(
        records: &[TransactionRecord],
        formatter: &Formatter,
    ) -> ServiceResult<NormalizedTransactions> {
        let mut normalized = NormalizedTransactions::default();
        for record in records {
            let entry = record.parse_in(formatter.zone)?;
            normalized.totals.add(entry.kind(), entry.amount);
            normalized.transactions.push(Self::view(&entry, formatter));
        }
        Ok(normalized)
    }

    /// Direction totals without formatting.
    pub fn totals(records: &[TransactionRecord]) -> RunningTotals {
        let mut totals = RunningTotals::default();
        for record in records {
            if let Ok(amount) = record.parsed_amount() {
                if record.parsed_date().is_ok() {
                    totals.add(record.kind, amount);
                }
            }
        }
        totals
    }

    /// Validates `draft`, appends the new record to the store and returns it.
    pub fn register(
        store: &dyn TransactionStore,
        draft: TransactionDraft,
        clock: &dyn Clock,
    ) -> ServiceResult<TransactionRecord> {
        let record = Self::build_record(draft, clock)?;
        let mut records = load_transactions(store)?;
        records.push(record.clone());
        store.set(TRANSACTIONS_KEY, &records)?;
        tracing::info!(id = %record.id, kind = %record.kind, "registered transaction");
        Ok(record)
    }

    pub fn list(store: &dyn TransactionStore) -> ServiceResult<Vec<TransactionRecord>> {
        Ok(load_transactions(store)?)
    }

    fn build_record(draft: TransactionDraft, clock: &dyn Clock) -> ServiceResult<TransactionRecord> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("Name is required".into()));
        }

        let amount = draft.amount.trim();
        if amount.is_empty() {
            return Err(ServiceError::Validation("Amount is required".into()));
        }
        let value: f64 = amount
            .parse()
            .map_err(|_| ServiceError::Validation("Amount must be a number".into()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ServiceError::Validation("Amount must be positive".into()));
        }

        let kind = draft
            .kind
            .ok_or_else(|| ServiceError::Validation("Select the transaction type".into()))?;

        let category_key = draft
            .category
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ServiceError::Validation("Select a category".into()))?;
        let category = Category::from_key(category_key).ok_or_else(|| {
            ServiceError::Validation(format!("Unknown category `{category_key}`"))
        })?;

        Ok(TransactionRecord::new(
            Uuid::new_v4().to_string(),
            name,
            amount,
            kind,
            category.key(),
            clock.timestamp(),
        ))
    }

    fn view(entry: &ParsedRecord<'_>, formatter: &Formatter) -> TransactionView {
        let record = entry.record;
        TransactionView {
            id: record.id.clone(),
            name: record.name.clone(),
            amount: formatter.format_amount(entry.amount),
            date: formatter.format_date(entry.date()),
            kind: record.kind,
            category: record.category.clone(),
        }
    }
}
