//! Calendar-date normalization for the `dteday` column.
//!
//! The source files carry dates as plain strings.  [`parse_date`] accepts the
//! handful of layouts seen in exported spreadsheets and discards any time
//! component, so every record ends up with a comparable [`NaiveDate`].

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::error::{DashboardError, Result};

/// Date-only layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date-time layouts whose time component is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a date string into a [`NaiveDate`].
///
/// Returns `None` for empty strings and unrecognised layouts.
///
/// # Examples
///
/// ```
/// use bikeshare_core::dates::parse_date;
/// use chrono::NaiveDate;
///
/// let d = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
/// assert_eq!(parse_date("2011-01-01"), Some(d));
/// assert_eq!(parse_date("2011-01-01 00:00:00"), Some(d));
/// assert_eq!(parse_date("01/01/2011"), Some(d));
/// assert_eq!(parse_date("yesterday"), None);
/// ```
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Like [`parse_date`] but reports the offending value on failure.
pub fn parse_date_strict(s: &str) -> Result<NaiveDate> {
    parse_date(s).ok_or_else(|| DashboardError::InvalidDate(s.to_string()))
}

/// `serde` adapter for date columns: `#[serde(deserialize_with = "...")]`.
pub fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date \"{}\"", raw.trim())))
}

/// Weekday code in the dataset's convention: 0 = Sunday … 6 = Saturday.
pub fn weekday_code(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

// ── Tests ──────────────────────────────────────────────────────────────────────
