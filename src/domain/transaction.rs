//! Persisted transaction records and the rules for reading their raw fields.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, Utc};
use serde::{de::Deserializer, Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::errors::RecordError;

/// Direction of a transaction: money coming in or going out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Positive,
    Negative,
}

impl TransactionType {
    /// Parses user-facing aliases as well as the persisted names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" | "income" | "in" | "entry" => Some(TransactionType::Positive),
            "negative" | "expense" | "out" | "outcome" => Some(TransactionType::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Positive => "Income",
            TransactionType::Negative => "Expense",
        };
        f.write_str(label)
    }
}

/// A transaction exactly as it is persisted in the store.
///
/// `amount` and `date` stay textual; they are coerced on every read through
/// [`TransactionRecord::parse`] so malformed data can be reported per record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub date: String,
}

impl TransactionRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: impl Into<String>,
        kind: TransactionType,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount: amount.into(),
            kind,
            category: category.into(),
            date: date.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Positive
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Negative
    }

    /// Coerces the amount into a non-negative finite magnitude.
    pub fn parsed_amount(&self) -> Result<f64, RecordError> {
        parse_amount(&self.amount).map_err(|negative| {
            if negative {
                RecordError::NegativeAmount {
                    id: self.id.clone(),
                    value: self.amount.clone(),
                }
            } else {
                RecordError::InvalidAmount {
                    id: self.id.clone(),
                    value: self.amount.clone(),
                }
            }
        })
    }

    /// Wall-clock timestamp of the record in the device's local zone.
    pub fn parsed_date(&self) -> Result<NaiveDateTime, RecordError> {
        self.parsed_date_in(CalendarZone::Local)
    }

    pub fn parsed_date_in(&self, zone: CalendarZone) -> Result<NaiveDateTime, RecordError> {
        parse_timestamp(&self.date, zone).ok_or_else(|| RecordError::InvalidDate {
            id: self.id.clone(),
            value: self.date.clone(),
        })
    }

    /// Validates both numeric and temporal fields at once, in the local zone.
    pub fn parse(&self) -> Result<ParsedRecord<'_>, RecordError> {
        self.parse_in(CalendarZone::Local)
    }

    pub fn parse_in(&self, zone: CalendarZone) -> Result<ParsedRecord<'_>, RecordError> {
        let amount = self.parsed_amount()?;
        let timestamp = self.parsed_date_in(zone)?;
        Ok(ParsedRecord {
            record: self,
            amount,
            timestamp,
        })
    }
}

impl Displayable for TransactionRecord {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.name, self.kind, self.category)
    }
}

/// A record whose amount and date have been successfully coerced.
#[derive(Debug, Clone, Copy)]
pub struct ParsedRecord<'a> {
    pub record: &'a TransactionRecord,
    pub amount: f64,
    pub timestamp: NaiveDateTime,
}

impl ParsedRecord<'_> {
    pub fn kind(&self) -> TransactionType {
        self.record.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Parses every record, splitting well-formed ones from the errors of the rest.
pub fn partition_records(
    records: &[TransactionRecord],
    zone: CalendarZone,
) -> (Vec<ParsedRecord<'_>>, Vec<RecordError>) {
    let mut parsed = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for record in records {
        match record.parse_in(zone) {
            Ok(value) => parsed.push(value),
            Err(err) => rejected.push(err),
        }
    }
    (parsed, rejected)
}

/// `Err(true)` marks a negative value, `Err(false)` anything non-numeric.
fn parse_amount(raw: &str) -> Result<f64, bool> {
    let value: f64 = raw.trim().parse().map_err(|_| false)?;
    if !value.is_finite() {
        return Err(false);
    }
    if value < 0.0 {
        return Err(true);
    }
    Ok(value)
}

/// Zone whose wall clock places offset-bearing timestamps on a calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarZone {
    /// The device's local zone.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl CalendarZone {
    pub fn utc() -> Self {
        CalendarZone::Fixed(Utc.fix())
    }

    /// Accepts `local`, `utc`/`z` or a `+HH:MM` offset.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Some(CalendarZone::Local),
            "utc" | "z" => Some(Self::utc()),
            other => other.parse::<FixedOffset>().ok().map(CalendarZone::Fixed),
        }
    }

    pub fn wall_clock(&self, instant: DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            CalendarZone::Local => instant.with_timezone(&Local).naive_local(),
            CalendarZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

/// Reads an ISO-8601 timestamp.
///
/// Timestamps carrying an offset are moved to `zone` first; naive timestamps and
/// plain dates are taken as already being wall-clock values.
pub fn parse_timestamp(raw: &str, zone: CalendarZone) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(zone.wall_clock(value));
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(value);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Keeps any JSON scalar as text so a bad field fails its record, not the list.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: &str, date: &str) -> TransactionRecord {
        TransactionRecord::new("t1", "Lunch", amount, TransactionType::Negative, "food", date)
    }

    #[test]
    fn parses_rfc3339_and_plain_dates() {
        let full_rec = record("10", "2024-01-05T10:30:00.000Z");
        let full = full_rec
            .parse_in(CalendarZone::utc())
            .expect("valid");
        assert_eq!(full.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        let plain_rec = record("10", "2024-01-05");
        let plain = plain_rec.parse().expect("valid");
        assert_eq!(plain.timestamp.date(), full.date());

        let naive_rec = record("10", "2024-01-05T23:59:00");
        let naive = naive_rec.parse().expect("valid");
        assert_eq!(naive.date(), full.date());
    }

    #[test]
    fn offset_timestamps_land_on_the_zone_day() {
        let sao_paulo = CalendarZone::parse("-03:00").expect("offset");
        let stamped = record("1", "2024-02-01T01:00:00.000Z");

        let local = stamped.parse_in(sao_paulo).expect("valid");
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(local.timestamp.format("%H:%M").to_string(), "22:00");

        let utc = stamped.parse_in(CalendarZone::utc()).expect("valid");
        assert_eq!(utc.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn calendar_zone_names() {
        assert_eq!(CalendarZone::parse("LOCAL"), Some(CalendarZone::Local));
        assert_eq!(CalendarZone::parse("utc"), Some(CalendarZone::utc()));
        assert!(matches!(CalendarZone::parse("+09:00"), Some(CalendarZone::Fixed(_))));
        assert_eq!(CalendarZone::parse("Mars/Olympus"), None);
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(matches!(
            record("abc", "2024-01-05").parse(),
            Err(RecordError::InvalidAmount { .. })
        ));
        assert!(matches!(
            record("-5", "2024-01-05").parse(),
            Err(RecordError::NegativeAmount { .. })
        ));
        assert!(matches!(
            record("NaN", "2024-01-05").parse(),
            Err(RecordError::InvalidAmount { .. })
        ));
        assert!(matches!(
            record("", "2024-01-05").parse(),
            Err(RecordError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn rejects_invalid_dates() {
        let err = record("10", "2024-13-45").parse().expect_err("invalid date");
        assert_eq!(err.record_id(), "t1");
    }

    #[test]
    fn deserializes_persisted_shape() {
        let json = r#"{"id":"a","name":"Salary","amount":1500,"type":"positive","category":"salary","date":"2024-02-01"}"#;
        let record: TransactionRecord = serde_json::from_str(json).expect("decode");
        assert_eq!(record.amount, "1500");
        assert_eq!(record.kind, TransactionType::Positive);

        let encoded = serde_json::to_string(&record).expect("encode");
        assert!(encoded.contains(r#""type":"positive""#));
        assert!(encoded.contains(r#""amount":"1500""#));
    }

    #[test]
    fn non_text_fields_fail_only_their_record() {
        let json = r#"[
            {"id":"ok","name":"Lunch","amount":"12","type":"negative","category":"food","date":"2024-01-05"},
            {"id":"null-amount","name":"Bus","amount":null,"type":"negative","category":"car","date":"2024-01-06"},
            {"id":"flag-amount","name":"Gift","amount":true,"type":"positive","category":"salary","date":"2024-01-07"},
            {"id":"numeric-date","name":"Book","amount":"8","type":"negative","category":"studies","date":1704412800000},
            {"id":"missing-date","name":"Cinema","amount":"9","type":"negative","category":"leisure"}
        ]"#;
        let records: Vec<TransactionRecord> = serde_json::from_str(json).expect("decode");
        assert_eq!(records.len(), 5);
        assert_eq!(records[1].amount, "null");

        let (parsed, rejected) = partition_records(&records, CalendarZone::utc());
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].record.id, "ok");
        assert!(matches!(rejected[0], RecordError::InvalidAmount { .. }));
        assert!(matches!(rejected[1], RecordError::InvalidAmount { .. }));
        assert!(matches!(rejected[2], RecordError::InvalidDate { .. }));
        assert!(matches!(rejected[3], RecordError::InvalidDate { .. }));
    }

    #[test]
    fn transaction_type_aliases() {
        assert_eq!(TransactionType::parse("income"), Some(TransactionType::Positive));
        assert_eq!(TransactionType::parse("Negative"), Some(TransactionType::Negative));
        assert_eq!(TransactionType::parse("transfer"), None);
    }
}
