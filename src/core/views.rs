//! Snapshot loaders for the dashboard and the monthly resume.
//!
//! Each loader reads the whole transaction list once and recomputes everything
//! from it; nothing is cached between calls.

use crate::core::services::{
    CategoryService, HighlightSummary, MonthlyBreakdown, SummaryService, TransactionService,
    TransactionView,
};
use crate::currency::Formatter;
use crate::domain::{Category, TransactionRecord, ViewedPeriod};
use crate::errors::{RecordError, Result};
use crate::storage::{load_transactions, TransactionStore};

/// Everything the dashboard renders after a refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub transactions: Vec<TransactionView>,
    pub highlights: HighlightSummary,
    pub skipped: Vec<RecordError>,
}

impl DashboardSnapshot {
    pub fn from_records(records: &[TransactionRecord], formatter: &Formatter) -> Self {
        let normalized = TransactionService::normalize(records, formatter);
        let highlights = SummaryService::highlights(records, &normalized.totals, formatter);
        Self {
            transactions: normalized.transactions,
            highlights,
            skipped: normalized.skipped,
        }
    }
}

pub fn load_dashboard(store: &dyn TransactionStore, formatter: &Formatter) -> Result<DashboardSnapshot> {
    let records = load_transactions(store)?;
    Ok(DashboardSnapshot::from_records(&records, formatter))
}

pub fn load_resume(
    store: &dyn TransactionStore,
    period: ViewedPeriod,
    formatter: &Formatter,
) -> Result<MonthlyBreakdown> {
    let records = load_transactions(store)?;
    Ok(CategoryService::monthly_breakdown(
        &records,
        period,
        Category::catalog(),
        formatter,
    ))
}
