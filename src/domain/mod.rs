pub mod category;
pub mod common;
pub mod period;
pub mod transaction;

pub use category::Category;
pub use common::Displayable;
pub use period::{PeriodStep, ViewedPeriod};
pub use transaction::{CalendarZone, ParsedRecord, TransactionRecord, TransactionType};
