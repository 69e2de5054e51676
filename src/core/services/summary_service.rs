use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::core::services::transaction_service::RunningTotals;
use crate::currency::Formatter;
use crate::domain::{CalendarZone, TransactionRecord, TransactionType};

/// Most recent activity shown on a highlight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastActivity {
    /// No transaction contributes to this card yet.
    None,
    On(NaiveDate),
    Range { first: NaiveDate, last: NaiveDate },
}

/// A single highlight card: an amount plus a recency descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightEntry {
    pub amount: f64,
    pub formatted_amount: String,
    pub last_transaction: LastActivity,
    pub description: String,
}

/// Income, expense and net cards for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSummary {
    pub entries: HighlightEntry,
    pub expensives: HighlightEntry,
    pub total: HighlightEntry,
}

pub struct SummaryService;

impl SummaryService {
    pub fn highlights(
        records: &[TransactionRecord],
        totals: &RunningTotals,
        formatter: &Formatter,
    ) -> HighlightSummary {
        let entries =
            Self::direction_entry(records, TransactionType::Positive, totals.entries, formatter);
        let expensives =
            Self::direction_entry(records, TransactionType::Negative, totals.expenses, formatter);

        let interval = Self::transaction_interval(records, formatter.zone);
        let total = HighlightEntry {
            amount: totals.net(),
            formatted_amount: formatter.format_amount(totals.net()),
            last_transaction: match interval {
                Some((first, last)) => LastActivity::Range {
                    first: first.date(),
                    last: last.date(),
                },
                None => LastActivity::None,
            },
            description: match interval {
                Some((first, last)) => Self::describe_interval(first.date(), last.date(), formatter),
                None => "No transactions yet".into(),
            },
        };

        tracing::debug!(
            entries = totals.entries,
            expenses = totals.expenses,
            "computed highlight summary"
        );

        HighlightSummary {
            entries,
            expensives,
            total,
        }
    }

    /// Latest timestamp among well-formed records of `kind`.
    pub fn last_transaction_date(
        records: &[TransactionRecord],
        kind: TransactionType,
        zone: CalendarZone,
    ) -> Option<NaiveDateTime> {
        records
            .iter()
            .filter(|record| record.kind == kind)
            .filter_map(|record| Self::valid_timestamp(record, zone))
            .max()
    }

    /// Earliest and latest timestamps over all well-formed records.
    pub fn transaction_interval(
        records: &[TransactionRecord],
        zone: CalendarZone,
    ) -> Option<(NaiveDateTime, NaiveDateTime)> {
        records
            .iter()
            .filter_map(|record| Self::valid_timestamp(record, zone))
            .fold(None, |range, timestamp| match range {
                None => Some((timestamp, timestamp)),
                Some((first, last)) => Some((first.min(timestamp), last.max(timestamp))),
            })
    }

    /// Day/month range, with years appended when the range spans calendar years.
    pub fn describe_interval(first: NaiveDate, last: NaiveDate, formatter: &Formatter) -> String {
        if first.year() == last.year() {
            format!(
                "{} ~ {}",
                formatter.format_day_month(first),
                formatter.format_day_month(last)
            )
        } else {
            format!(
                "{} ~ {}",
                formatter.format_date(first),
                formatter.format_date(last)
            )
        }
    }

    fn direction_entry(
        records: &[TransactionRecord],
        kind: TransactionType,
        amount: f64,
        formatter: &Formatter,
    ) -> HighlightEntry {
        let last = Self::last_transaction_date(records, kind, formatter.zone)
            .map(|timestamp| timestamp.date());
        let (label, placeholder) = match kind {
            TransactionType::Positive => ("entry", "No entries yet"),
            TransactionType::Negative => ("expense", "No expenses yet"),
        };
        let description = match last {
            Some(date) => format!("Last {label} {}", formatter.format_date(date)),
            None => placeholder.to_string(),
        };
        HighlightEntry {
            amount,
            formatted_amount: formatter.format_amount(amount),
            last_transaction: last.map_or(LastActivity::None, LastActivity::On),
            description,
        }
    }

    fn valid_timestamp(record: &TransactionRecord, zone: CalendarZone) -> Option<NaiveDateTime> {
        match record.parse_in(zone) {
            Ok(parsed) => Some(parsed.timestamp),
            Err(err) => {
                tracing::debug!(record = err.record_id(), "ignoring for recency: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::TransactionService;

    fn record(id: &str, kind: TransactionType, date: &str) -> TransactionRecord {
        TransactionRecord::new(id, "Item", "10", kind, "food", date)
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn summarize(records: &[TransactionRecord]) -> HighlightSummary {
        let formatter = Formatter::default().with_zone(CalendarZone::utc());
        let totals = TransactionService::totals(records);
        SummaryService::highlights(records, &totals, &formatter)
    }

    #[test]
    fn picks_latest_date_per_direction() {
        let records = vec![
            record("a", TransactionType::Positive, "2024-01-05"),
            record("b", TransactionType::Positive, "2024-02-01T09:00:00.000Z"),
            record("c", TransactionType::Negative, "2024-01-20"),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.entries.description, "Last entry 2024/02/01");
        assert_eq!(summary.expensives.description, "Last expense 2024/01/20");
        assert_eq!(summary.total.description, "01/05 ~ 02/01");
    }

    #[test]
    fn recency_ignores_list_order() {
        let records = vec![
            record("d", TransactionType::Negative, "2024-02-10"),
            record("c", TransactionType::Positive, "2023-11-20"),
            record("b", TransactionType::Positive, "2024-03-02T08:00:00.000Z"),
            record("a", TransactionType::Negative, "2024-01-15"),
            record("e", TransactionType::Positive, "2024-01-01"),
        ];
        let zone = CalendarZone::utc();

        let last_entry = SummaryService::last_transaction_date(&records, TransactionType::Positive, zone);
        assert_eq!(last_entry.map(|ts| ts.date()), Some(date(2024, 3, 2)));
        let last_expense =
            SummaryService::last_transaction_date(&records, TransactionType::Negative, zone);
        assert_eq!(last_expense.map(|ts| ts.date()), Some(date(2024, 2, 10)));

        let (first, last) = SummaryService::transaction_interval(&records, zone).expect("range");
        assert_eq!((first.date(), last.date()), (date(2023, 11, 20), date(2024, 3, 2)));

        let summary = summarize(&records);
        assert_eq!(summary.entries.description, "Last entry 2024/03/02");
        assert_eq!(summary.expensives.description, "Last expense 2024/02/10");
        assert_eq!(summary.total.description, "2023/11/20 ~ 2024/03/02");
    }

    #[test]
    fn missing_direction_yields_placeholder() {
        let records = vec![record("a", TransactionType::Positive, "2024-01-05")];
        let summary = summarize(&records);
        assert_eq!(summary.expensives.last_transaction, LastActivity::None);
        assert_eq!(summary.expensives.description, "No expenses yet");
        assert_eq!(summary.expensives.formatted_amount, "¥0");
    }

    #[test]
    fn range_spanning_years_includes_years() {
        let records = vec![
            record("a", TransactionType::Negative, "2023-12-28"),
            record("b", TransactionType::Positive, "2024-01-03"),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total.description, "2023/12/28 ~ 2024/01/03");
    }

    #[test]
    fn single_day_range_repeats_the_day() {
        let records = vec![record("a", TransactionType::Negative, "2024-06-15")];
        let summary = summarize(&records);
        assert_eq!(summary.total.description, "06/15 ~ 06/15");
        let day = date(2024, 6, 15);
        assert_eq!(
            summary.total.last_transaction,
            LastActivity::Range { first: day, last: day }
        );
    }

    #[test]
    fn malformed_dates_do_not_affect_recency() {
        let records = vec![
            record("a", TransactionType::Negative, "2024-06-15"),
            record("b", TransactionType::Negative, "not-a-date"),
        ];
        assert_eq!(
            SummaryService::last_transaction_date(
                &records,
                TransactionType::Negative,
                CalendarZone::Local,
            )
            .map(|ts| ts.date()),
            Some(date(2024, 6, 15))
        );
    }

    #[test]
    fn empty_list_is_all_placeholders() {
        let summary = summarize(&[]);
        assert_eq!(summary.total.amount, 0.0);
        assert_eq!(summary.total.last_transaction, LastActivity::None);
        assert_eq!(summary.total.description, "No transactions yet");
        assert_eq!(summary.entries.description, "No entries yet");
    }
}
