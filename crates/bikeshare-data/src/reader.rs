//! CSV loading for the daily and hourly bike-sharing files.
//!
//! Each file is read once: every raw field feeds a column profiler (type
//! inference and null counts for the overview tables) and every row is
//! deserialized into its typed record with `dteday` normalized to a
//! [`NaiveDate`](chrono::NaiveDate).

use std::fs::File;
use std::path::{Path, PathBuf};

use bikeshare_core::dates::{parse_date, weekday_code};
use bikeshare_core::error::{DashboardError, Result};
use bikeshare_core::models::{
    ColumnProfile, ColumnType, DailyRecord, DatedRecord, HourlyRecord, TableProfile,
};
use csv::StringRecord;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

// ── Public types ──────────────────────────────────────────────────────────────

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub day: PathBuf,
    pub hour: PathBuf,
}

impl DataSources {
    pub fn new(day: impl Into<PathBuf>, hour: impl Into<PathBuf>) -> Self {
        Self {
            day: day.into(),
            hour: hour.into(),
        }
    }
}

/// Typed rows of one file together with its raw-column profile.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable<T> {
    pub records: Vec<T>,
    pub profile: TableProfile,
    /// Rows whose `weekday` code disagrees with the calendar day of `dteday`.
    pub weekday_mismatches: usize,
}

impl<T> LoadedTable<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Both tables, as consumed by the analysis pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub daily: LoadedTable<DailyRecord>,
    pub hourly: LoadedTable<HourlyRecord>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the daily file, keeping the first `head_rows` raw rows for previews.
pub fn load_daily(path: &Path, head_rows: usize) -> Result<LoadedTable<DailyRecord>> {
    load_table(path, head_rows)
}

/// Load the hourly file, keeping the first `head_rows` raw rows for previews.
pub fn load_hourly(path: &Path, head_rows: usize) -> Result<LoadedTable<HourlyRecord>> {
    load_table(path, head_rows)
}

/// Load both files.  The first failure aborts the whole load.
pub fn load_datasets(sources: &DataSources, head_rows: usize) -> Result<Datasets> {
    let daily = load_daily(&sources.day, head_rows)?;
    let hourly = load_hourly(&sources.hour, head_rows)?;
    Ok(Datasets { daily, hourly })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn load_table<T>(path: &Path, head_rows: usize) -> Result<LoadedTable<T>>
where
    T: DeserializeOwned + DatedRecord,
{
    let file = File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_err = |source: csv::Error| DashboardError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let mut profiler = ColumnProfiler::new(&headers);

    let mut records: Vec<T> = Vec::new();
    let mut head: Vec<Vec<String>> = Vec::new();
    let mut weekday_mismatches = 0usize;

    for result in reader.records() {
        let raw = result.map_err(csv_err)?;
        profiler.observe(&raw);
        if head.len() < head_rows {
            head.push(raw.iter().map(str::to_string).collect());
        }

        let record: T = raw.deserialize(Some(&headers)).map_err(csv_err)?;
        if weekday_code(record.date()) != record.weekday_code() {
            weekday_mismatches += 1;
        }
        records.push(record);
    }

    if weekday_mismatches > 0 {
        warn!(
            "{}: {} rows carry a weekday code that disagrees with dteday",
            path.display(),
            weekday_mismatches
        );
    }

    debug!(
        "Loaded {} rows ({} columns) from {}",
        records.len(),
        headers.len(),
        path.display()
    );

    Ok(LoadedTable {
        profile: TableProfile {
            columns: profiler.finish(),
            head,
            row_count: records.len(),
        },
        records,
        weekday_mismatches,
    })
}

/// Running type inference for each column of a file.
struct ColumnProfiler {
    columns: Vec<ColumnState>,
}

struct ColumnState {
    name: String,
    nulls: usize,
    present: usize,
    all_int: bool,
    all_float: bool,
    all_date: bool,
}

impl ColumnProfiler {
    fn new(headers: &StringRecord) -> Self {
        Self {
            columns: headers
                .iter()
                .map(|name| ColumnState {
                    name: name.to_string(),
                    nulls: 0,
                    present: 0,
                    all_int: true,
                    all_float: true,
                    all_date: true,
                })
                .collect(),
        }
    }

    fn observe(&mut self, row: &StringRecord) {
        for (state, field) in self.columns.iter_mut().zip(row.iter()) {
            if field.is_empty() {
                state.nulls += 1;
                continue;
            }
            state.present += 1;
            if state.all_int && field.parse::<i64>().is_err() {
                state.all_int = false;
            }
            if state.all_float && field.parse::<f64>().is_err() {
                state.all_float = false;
            }
            if state.all_date && parse_date(field).is_none() {
                state.all_date = false;
            }
        }
    }

    fn finish(self) -> Vec<ColumnProfile> {
        self.columns
            .into_iter()
            .map(|s| {
                let dtype = if s.present == 0 {
                    ColumnType::Empty
                } else if s.all_int {
                    ColumnType::Int64
                } else if s.all_float {
                    ColumnType::Float64
                } else if s.all_date {
                    ColumnType::Date
                } else {
                    ColumnType::Text
                };
                ColumnProfile {
                    name: s.name,
                    dtype,
                    null_count: s.nulls,
                }
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
