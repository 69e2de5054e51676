use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for domain, storage and configuration layers.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

/// Describes why a persisted transaction record cannot take part in aggregation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("transaction {id} has a non-numeric amount `{value}`")]
    InvalidAmount { id: String, value: String },
    #[error("transaction {id} has a negative amount `{value}`")]
    NegativeAmount { id: String, value: String },
    #[error("transaction {id} has an unparseable date `{value}`")]
    InvalidDate { id: String, value: String },
}

impl RecordError {
    /// Identifier of the offending record.
    pub fn record_id(&self) -> &str {
        match self {
            RecordError::InvalidAmount { id, .. }
            | RecordError::NegativeAmount { id, .. }
            | RecordError::InvalidDate { id, .. } => id,
        }
    }
}
