//! Fixtures shared by the rendering tests.

use bikeshare_core::models::{
    ColumnProfile, ColumnType, HourProfile, TableProfile, Weekday, WeekdayAggregate,
    DAILY_NUMERIC_COLUMNS,
};
use bikeshare_core::stats::{correlation_matrix, describe, histogram};
use bikeshare_data::analysis::{
    AnalysisMetadata, DashboardData, Distribution, ScatterSeries, WeatherFactor,
};
use bikeshare_data::reader::DataSources;
use chrono::NaiveDate;
use ratatui::buffer::Buffer;

/// Every cell symbol of `buffer`, row by row, rows separated by newlines.
pub fn buffer_text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width.max(1))
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn profile(columns: &[&str], rows: usize) -> TableProfile {
    TableProfile {
        columns: columns
            .iter()
            .map(|&name| ColumnProfile {
                name: name.to_string(),
                dtype: if name == "dteday" {
                    ColumnType::Date
                } else {
                    ColumnType::Int64
                },
                null_count: 0,
            })
            .collect(),
        head: (0..rows.min(3))
            .map(|i| {
                columns
                    .iter()
                    .map(|&c| {
                        if c == "dteday" {
                            format!("2011-01-0{}", i + 1)
                        } else {
                            i.to_string()
                        }
                    })
                    .collect()
            })
            .collect(),
        row_count: rows,
    }
}

/// A small but fully populated dashboard: 28 days, weekday totals rising
/// from Sunday to Saturday.
pub fn sample_dashboard() -> DashboardData {
    let counts: Vec<f64> = (0..28).map(|i| f64::from(2_000 + i * 150)).collect();
    let temps: Vec<f64> = (0..28).map(|i| 5.0 + f64::from(i)).collect();
    let hums: Vec<f64> = (0..28).map(|i| 90.0 - f64::from(i)).collect();
    let winds: Vec<f64> = (0..28).map(|i| 5.0 + f64::from(i % 5) * 3.0).collect();

    let columns: Vec<(&str, Vec<f64>)> = DAILY_NUMERIC_COLUMNS
        .iter()
        .enumerate()
        .map(|(k, &name)| {
            let values = counts
                .iter()
                .enumerate()
                .map(|(i, c)| c * (k as f64 + 1.0) + ((i * k) % 7) as f64 * 40.0)
                .collect();
            (name, values)
        })
        .collect();

    let weekday: Vec<WeekdayAggregate> = Weekday::ALL
        .iter()
        .map(|&label| WeekdayAggregate {
            label,
            recency: Some(6 - i64::from(label.code())),
            monetary: 10_000 + u64::from(label.code()) * 1_500,
            frequency: 4,
        })
        .collect();

    let hourly: Vec<HourProfile> = (0..24u8)
        .map(|hour| {
            let base = f64::from(hour) * 10.0;
            HourProfile {
                hour,
                mean: Some(base),
                mean_working_day: Some(base * 1.2),
                mean_off_day: Some(base * 0.6),
                total: u64::from(hour) * 280,
                samples: 28,
            }
        })
        .collect();

    let day_cols = [
        "instant", "dteday", "season", "yr", "mnth", "holiday", "weekday", "workingday",
        "weathersit", "temp", "atemp", "hum", "windspeed", "casual", "registered", "cnt",
    ];
    let mut hour_cols = day_cols.to_vec();
    hour_cols.insert(5, "hr");

    DashboardData {
        sources: DataSources::new("dashboard/day.csv", "dashboard/hour.csv"),
        daily_profile: profile(&day_cols, 28),
        hourly_profile: profile(&hour_cols, 672),
        weekday_totals: weekday.iter().map(|a| (a.label, a.monetary)).collect(),
        weekday,
        distribution: Distribution {
            summary: describe(&counts),
            bins: histogram(&counts, 10),
            density: counts.iter().map(|&c| (c, 2.0)).collect(),
        },
        correlation: correlation_matrix(&columns),
        scatter: WeatherFactor::ALL
            .iter()
            .zip([temps, hums, winds])
            .map(|(&factor, xs)| ScatterSeries {
                factor,
                correlation: bikeshare_core::stats::pearson(&xs, &counts),
                points: xs.into_iter().zip(counts.iter().copied()).collect(),
            })
            .collect(),
        hourly,
        total_rentals: counts.iter().sum::<f64>() as u64,
        metadata: AnalysisMetadata {
            generated_at: "2024-01-01T00:00:00+00:00".to_string(),
            daily_rows: 28,
            hourly_rows: 672,
            first_date: NaiveDate::from_ymd_opt(2011, 1, 1),
            last_date: NaiveDate::from_ymd_opt(2011, 1, 28),
            weekday_mismatches: 0,
            load_time_seconds: 0.01,
            transform_time_seconds: 0.001,
        },
    }
}

/// The dashboard produced from two empty files.
pub fn empty_dashboard() -> DashboardData {
    DashboardData {
        sources: DataSources::new("day.csv", "hour.csv"),
        daily_profile: TableProfile::default(),
        hourly_profile: TableProfile::default(),
        weekday: Weekday::ALL
            .iter()
            .map(|&label| WeekdayAggregate {
                label,
                recency: None,
                monetary: 0,
                frequency: 0,
            })
            .collect(),
        weekday_totals: Weekday::ALL.iter().map(|&d| (d, 0)).collect(),
        distribution: Distribution {
            summary: None,
            bins: Vec::new(),
            density: Vec::new(),
        },
        correlation: correlation_matrix(
            &DAILY_NUMERIC_COLUMNS
                .iter()
                .map(|&n| (n, Vec::new()))
                .collect::<Vec<_>>(),
        ),
        scatter: WeatherFactor::ALL
            .iter()
            .map(|&factor| ScatterSeries {
                factor,
                points: Vec::new(),
                correlation: None,
            })
            .collect(),
        hourly: (0..24u8)
            .map(|hour| HourProfile {
                hour,
                mean: None,
                mean_working_day: None,
                mean_off_day: None,
                total: 0,
                samples: 0,
            })
            .collect(),
        total_rentals: 0,
        metadata: AnalysisMetadata {
            generated_at: "2024-01-01T00:00:00+00:00".to_string(),
            daily_rows: 0,
            hourly_rows: 0,
            first_date: None,
            last_date: None,
            weekday_mismatches: 0,
            load_time_seconds: 0.0,
            transform_time_seconds: 0.0,
        },
    }
}
