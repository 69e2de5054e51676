pub mod category_service;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::{CategoryService, CategorySummary, MonthlyBreakdown};
pub use summary_service::{HighlightEntry, HighlightSummary, LastActivity, SummaryService};
pub use transaction_service::{
    NormalizedTransactions, RunningTotals, TransactionDraft, TransactionService, TransactionView,
};

use crate::errors::{FinanceError, RecordError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("{0}")]
    Validation(String),
}
