use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::deserialize_date;

/// Scale factors published with the dataset for its normalized covariates.
pub const TEMP_MAX_CELSIUS: f64 = 41.0;
pub const ATEMP_MAX_CELSIUS: f64 = 50.0;
pub const HUMIDITY_MAX_PCT: f64 = 100.0;
pub const WINDSPEED_MAX_KMH: f64 = 67.0;

/// Names of the numeric daily columns, in file order.
pub const DAILY_NUMERIC_COLUMNS: [&str; 15] = [
    "instant",
    "season",
    "yr",
    "mnth",
    "holiday",
    "weekday",
    "workingday",
    "weathersit",
    "temp",
    "atemp",
    "hum",
    "windspeed",
    "casual",
    "registered",
    "cnt",
];

// ── Weekday ────────────────────────────────────────────────────────────────────

/// Day-of-week bucket keyed by the dataset's 0–6 code (0 = Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All seven buckets in code order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Map a numeric code to its bucket; `None` outside 0–6.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Three-letter label for narrow chart axes.
    pub fn short_label(self) -> &'static str {
        &self.label()[..3]
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Reject weekday codes outside 0–6 while deserializing a row.
fn deserialize_weekday_code<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u8::deserialize(deserializer)?;
    if Weekday::from_code(code).is_none() {
        return Err(serde::de::Error::custom(format!(
            "weekday code {} outside 0-6",
            code
        )));
    }
    Ok(code)
}

// ── DailyRecord ────────────────────────────────────────────────────────────────

/// One row of the daily file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub instant: u32,
    #[serde(deserialize_with = "deserialize_date")]
    pub dteday: NaiveDate,
    pub season: u8,
    pub yr: u8,
    pub mnth: u8,
    pub holiday: u8,
    #[serde(deserialize_with = "deserialize_weekday_code")]
    pub weekday: u8,
    pub workingday: u8,
    pub weathersit: u8,
    /// Normalized temperature (°C / 41).
    pub temp: f64,
    /// Normalized feeling temperature (°C / 50).
    pub atemp: f64,
    /// Normalized humidity (% / 100).
    pub hum: f64,
    /// Normalized wind speed (km/h / 67).
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    /// Total rentals that day.
    pub cnt: u32,
}

impl DailyRecord {
    pub fn temp_celsius(&self) -> f64 {
        self.temp * TEMP_MAX_CELSIUS
    }

    pub fn atemp_celsius(&self) -> f64 {
        self.atemp * ATEMP_MAX_CELSIUS
    }

    pub fn humidity_pct(&self) -> f64 {
        self.hum * HUMIDITY_MAX_PCT
    }

    pub fn windspeed_kmh(&self) -> f64 {
        self.windspeed * WINDSPEED_MAX_KMH
    }

    pub fn weekday_label(&self) -> Option<Weekday> {
        Weekday::from_code(self.weekday)
    }

    /// Numeric columns as `f64`, aligned with [`DAILY_NUMERIC_COLUMNS`].
    pub fn numeric_values(&self) -> [f64; 15] {
        [
            f64::from(self.instant),
            f64::from(self.season),
            f64::from(self.yr),
            f64::from(self.mnth),
            f64::from(self.holiday),
            f64::from(self.weekday),
            f64::from(self.workingday),
            f64::from(self.weathersit),
            self.temp,
            self.atemp,
            self.hum,
            self.windspeed,
            f64::from(self.casual),
            f64::from(self.registered),
            f64::from(self.cnt),
        ]
    }
}

// ── HourlyRecord ───────────────────────────────────────────────────────────────

/// One row of the hourly file.  Shares `dteday` with the other rows of the
/// same day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub instant: u32,
    #[serde(deserialize_with = "deserialize_date")]
    pub dteday: NaiveDate,
    pub season: u8,
    pub yr: u8,
    pub mnth: u8,
    pub hr: u8,
    pub holiday: u8,
    #[serde(deserialize_with = "deserialize_weekday_code")]
    pub weekday: u8,
    pub workingday: u8,
    pub weathersit: u8,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

impl HourlyRecord {
    pub fn is_working_day(&self) -> bool {
        self.workingday == 1
    }
}

/// Common access used by the loader for both record kinds.
pub trait DatedRecord {
    fn date(&self) -> NaiveDate;
    fn weekday_code(&self) -> u8;
}

impl DatedRecord for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.dteday
    }

    fn weekday_code(&self) -> u8 {
        self.weekday
    }
}

impl DatedRecord for HourlyRecord {
    fn date(&self) -> NaiveDate {
        self.dteday
    }

    fn weekday_code(&self) -> u8 {
        self.weekday
    }
}

// ── WeekdayAggregate ───────────────────────────────────────────────────────────

/// Recency / monetary / frequency figures for one weekday bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayAggregate {
    pub label: Weekday,
    /// Whole days between the bucket's latest date and the dataset's latest
    /// date.  `None` when the bucket is empty.
    pub recency: Option<i64>,
    /// Sum of `cnt` over the bucket.
    pub monetary: u64,
    /// Number of rows in the bucket.
    pub frequency: u32,
}

// ── HourProfile ────────────────────────────────────────────────────────────────

/// Mean rentals for one hour of the day across the hourly file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourProfile {
    pub hour: u8,
    pub mean: Option<f64>,
    pub mean_working_day: Option<f64>,
    pub mean_off_day: Option<f64>,
    pub total: u64,
    pub samples: u32,
}

// ── Column profiling ──────────────────────────────────────────────────────────

/// Inferred storage type of a raw CSV column, named the way dataframe
/// libraries print them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Date,
    Text,
    /// Every value is missing.
    Empty,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Date => "datetime64[ns]",
            ColumnType::Text => "object",
            ColumnType::Empty => "empty",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Type and missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: ColumnType,
    pub null_count: usize,
}

/// Shape summary of a loaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableProfile {
    pub columns: Vec<ColumnProfile>,
    /// First rows as raw strings, for previews.
    pub head: Vec<Vec<String>>,
    pub row_count: usize,
}

impl TableProfile {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn total_nulls(&self) -> usize {
        self.columns.iter().map(|c| c.null_count).sum()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
