//! Field values
//!
//! The binding layer stores whatever the presentation layer hands it; the
//! validator coerces those raw values into the typed variants.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A single field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text, as typed
    Text(String),

    /// Whole number
    Number(i64),

    /// Calendar date
    Date(NaiveDate),

    /// Departure/return pair from the date range picker
    DateRange(DateRange),

    /// Card expiry month
    YearMonth(YearMonth),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Get the text payload, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date_range(&self) -> Option<DateRange> {
        match self {
            FieldValue::DateRange(range) => Some(*range),
            _ => None,
        }
    }

    /// Text that is empty or only whitespace counts as "not provided"
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::DateRange(r) => write!(f, "{}", r),
            FieldValue::YearMonth(ym) => write!(f, "{}", ym),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<DateRange> for FieldValue {
    fn from(value: DateRange) -> Self {
        FieldValue::DateRange(value)
    }
}

/// Date range selection
///
/// No ordering is enforced on construction: the picker may briefly hold an
/// inverted range and the validator is the one that rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// One-night range starting on `start`
    pub fn one_day_from(start: NaiveDate) -> Self {
        let end_date = start.checked_add_days(Days::new(1)).unwrap_or(start);
        Self::new(start, end_date)
    }

    pub fn is_ordered(&self) -> bool {
        self.end_date >= self.start_date
    }

    /// Number of nights covered (zero for same-day or inverted ranges)
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_date, self.end_date)
    }
}

/// Year and month, as entered in a `YYYY-MM` month input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `YYYY-MM`
    pub fn parse(input: &str) -> Option<Self> {
        let (year, month) = input.trim().split_once('-')?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return None;
        }
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blank_detection() {
        assert!(FieldValue::text("").is_blank());
        assert!(FieldValue::text("   ").is_blank());
        assert!(!FieldValue::text("x").is_blank());
        assert!(!FieldValue::Number(0).is_blank());
    }

    #[test]
    fn test_one_day_range() {
        let range = DateRange::one_day_from(date(2027, 12, 31));
        assert_eq!(range.end_date, date(2028, 1, 1));
        assert!(range.is_ordered());
        assert_eq!(range.nights(), 1);
    }

    #[test]
    fn test_inverted_range() {
        let range = DateRange::new(date(2027, 5, 10), date(2027, 5, 8));
        assert!(!range.is_ordered());
        assert_eq!(range.nights(), 0);
    }

    #[test]
    fn test_year_month_parse() {
        assert_eq!(YearMonth::parse("2027-04"), YearMonth::new(2027, 4));
        assert_eq!(YearMonth::parse("2027-4"), YearMonth::new(2027, 4));
        assert_eq!(YearMonth::parse("2027-13"), None);
        assert_eq!(YearMonth::parse("27-04"), None);
        assert_eq!(YearMonth::parse("april"), None);
        assert_eq!(YearMonth::new(2027, 4).unwrap().to_string(), "2027-04");
    }

    #[test]
    fn test_year_month_ordering() {
        let a = YearMonth::new(2026, 12).unwrap();
        let b = YearMonth::new(2027, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serialization_shape() {
        let value = FieldValue::DateRange(DateRange::new(date(2027, 5, 1), date(2027, 5, 3)));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["startDate"], "2027-05-01");
        assert_eq!(json["endDate"], "2027-05-03");

        let json = serde_json::to_value(FieldValue::Number(2)).unwrap();
        assert_eq!(json, serde_json::json!(2));
    }
}
