//! The month a category breakdown is computed for.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use crate::errors::FinanceError;

/// Direction of a one-month step of the viewed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStep {
    Next,
    Prev,
}

/// A calendar month in a given year.
/// Only constructed through `new`, `parse` or `containing`, so the month is always 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewedPeriod {
    year: i32,
    month: u32,
}

impl ViewedPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, FinanceError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(FinanceError::InvalidInput(format!(
                "`{year}-{month:02}` is not a valid month"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Result<Self, FinanceError> {
        let invalid = || FinanceError::InvalidInput(format!("expected YYYY-MM, got `{value}`"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn prev(self) -> Self {
        self.shift(-1)
    }

    pub fn step(self, step: PeriodStep) -> Self {
        match step {
            PeriodStep::Next => self.next(),
            PeriodStep::Prev => self.prev(),
        }
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp.year() == self.year && timestamp.month() == self.month
    }

    fn shift(self, months: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for ViewedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
