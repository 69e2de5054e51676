use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::{CalendarZone, ViewedPeriod};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("JPY")
    }
}

/// Order of the numeric date fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateOrder {
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_separator: char,
    pub date_order: DateOrder,
}

impl LocaleConfig {
    fn preset(
        tag: &str,
        decimal_separator: char,
        grouping_separator: char,
        date_separator: char,
        date_order: DateOrder,
    ) -> Self {
        Self {
            language_tag: tag.into(),
            decimal_separator,
            grouping_separator,
            date_separator,
            date_order,
        }
    }

    /// Looks up a known locale preset by tag (`en_GB` and `en-gb` are accepted).
    pub fn for_tag(tag: &str) -> Option<LocaleConfig> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        LOCALE_PRESETS.get(normalized.as_str()).cloned()
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::preset("ja-JP", '.', ',', '/', DateOrder::YearMonthDay)
    }
}

static LOCALE_PRESETS: Lazy<HashMap<&'static str, LocaleConfig>> = Lazy::new(|| {
    use DateOrder::*;
    HashMap::from([
        ("ja-jp", LocaleConfig::default()),
        ("en-gb", LocaleConfig::preset("en-GB", '.', ',', '/', DayMonthYear)),
        ("en-us", LocaleConfig::preset("en-US", '.', ',', '/', MonthDayYear)),
        ("pt-br", LocaleConfig::preset("pt-BR", ',', '.', '/', DayMonthYear)),
        ("de-de", LocaleConfig::preset("de-DE", ',', '.', '.', DayMonthYear)),
        ("fr-fr", LocaleConfig::preset("fr-FR", ',', ' ', '/', DayMonthYear)),
    ])
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "BRL" => "R$".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders a non-negative magnitude with locale separators and fixed precision.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let fixed = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };
    let mut body = group_digits(int_part, locale.grouping_separator);
    if let Some(frac) = frac_part {
        body.push(locale.decimal_separator);
        body.push_str(frac);
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount, precision);
    let negative = amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    let prefix = match options.currency_display {
        CurrencyDisplay::Symbol => symbol_for(code.as_str()),
        CurrencyDisplay::Code => format!("{} ", code.as_str()),
    };
    match (negative, options.negative_style) {
        (false, _) => format!("{prefix}{body}"),
        (true, NegativeStyle::Sign) => format!("-{prefix}{body}"),
        (true, NegativeStyle::Parentheses) => format!("{} ({body})", prefix.trim_end()),
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

/// The single formatting policy applied to every amount and date of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formatter {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
    pub options: FormatOptions,
    /// Zone deciding the calendar day of offset-bearing record timestamps.
    pub zone: CalendarZone,
}

impl Formatter {
    pub fn new(currency: CurrencyCode, locale: LocaleConfig) -> Self {
        Self {
            currency,
            locale,
            options: FormatOptions::default(),
            zone: CalendarZone::Local,
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_zone(mut self, zone: CalendarZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format_currency_value(amount, &self.currency, &self.locale, &self.options)
    }

    /// Two-digit day and month plus the four-digit year, in locale order.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let sep = self.locale.date_separator;
        let (day, month, year) = (date.day(), date.month(), date.year());
        match self.locale.date_order {
            DateOrder::DayMonthYear => format!("{day:02}{sep}{month:02}{sep}{year:04}"),
            DateOrder::MonthDayYear => format!("{month:02}{sep}{day:02}{sep}{year:04}"),
            DateOrder::YearMonthDay => format!("{year:04}{sep}{month:02}{sep}{day:02}"),
        }
    }

    /// Two-digit day and month without the year.
    pub fn format_day_month(&self, date: NaiveDate) -> String {
        let sep = self.locale.date_separator;
        let (day, month) = (date.day(), date.month());
        match self.locale.date_order {
            DateOrder::DayMonthYear => format!("{day:02}{sep}{month:02}"),
            DateOrder::MonthDayYear | DateOrder::YearMonthDay => {
                format!("{month:02}{sep}{day:02}")
            }
        }
    }

    pub fn format_percent(&self, percent: u32) -> String {
        format!("{percent}%")
    }

    pub fn format_period(&self, period: ViewedPeriod) -> String {
        format!("{} {}", month_name(period.month()), period.year())
    }
}
