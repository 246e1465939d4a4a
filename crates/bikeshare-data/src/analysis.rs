//! Main analysis pipeline for the dashboard.
//!
//! Loads both files, aggregates them, and derives every series the
//! presenter draws, returning a [`DashboardData`] ready for the UI layer.

use bikeshare_core::error::Result;
use bikeshare_core::models::{
    DailyRecord, HourProfile, TableProfile, Weekday, WeekdayAggregate, DAILY_NUMERIC_COLUMNS,
};
use bikeshare_core::stats::{
    correlation_matrix, describe, gaussian_kde, histogram, pearson, CorrelationMatrix,
    HistogramBin, Summary,
};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::aggregator::{HourlyAggregator, WeekdayAggregator};
use crate::reader::{load_datasets, DataSources};

/// Evaluation points of the density overlay.
const DENSITY_POINTS: usize = 200;

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Histogram bins for the `cnt` distribution.
    pub bins: usize,
    /// Raw rows kept per file for previews.
    pub head_rows: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            bins: 30,
            head_rows: 5,
        }
    }
}

/// Metadata produced alongside the dashboard data.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    pub daily_rows: usize,
    pub hourly_rows: usize,
    /// Earliest and latest `dteday` of the daily file.
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Rows (both files) whose weekday code disagrees with their date.
    pub weekday_mismatches: usize,
    /// Wall-clock seconds spent reading and parsing both files.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub transform_time_seconds: f64,
}

/// `cnt` distribution: summary, histogram and a density curve scaled to the
/// histogram's counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub summary: Option<Summary>,
    pub bins: Vec<HistogramBin>,
    pub density: Vec<(f64, f64)>,
}

impl Distribution {
    fn from_values(values: &[f64], bins: usize) -> Self {
        let hist = histogram(values, bins);
        let bin_width = hist.first().map(HistogramBin::width).unwrap_or(0.0);
        let scale = values.len() as f64 * bin_width;
        let density = gaussian_kde(values, DENSITY_POINTS)
            .into_iter()
            .map(|(x, d)| (x, d * scale))
            .collect();
        Self {
            summary: describe(values),
            bins: hist,
            density,
        }
    }

    /// Tallest histogram bar.
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Which weather covariate a scatter series plots against `cnt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherFactor {
    Temperature,
    Humidity,
    Windspeed,
}

impl WeatherFactor {
    pub const ALL: [WeatherFactor; 3] = [
        WeatherFactor::Temperature,
        WeatherFactor::Humidity,
        WeatherFactor::Windspeed,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WeatherFactor::Temperature => "Temperature vs rentals",
            WeatherFactor::Humidity => "Humidity vs rentals",
            WeatherFactor::Windspeed => "Wind speed vs rentals",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            WeatherFactor::Temperature => "Temperature (°C)",
            WeatherFactor::Humidity => "Humidity (%)",
            WeatherFactor::Windspeed => "Wind speed (km/h)",
        }
    }

    fn value(self, record: &DailyRecord) -> f64 {
        match self {
            WeatherFactor::Temperature => record.temp_celsius(),
            WeatherFactor::Humidity => record.humidity_pct(),
            WeatherFactor::Windspeed => record.windspeed_kmh(),
        }
    }
}

/// One weather covariate against daily rentals.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub factor: WeatherFactor,
    pub points: Vec<(f64, f64)>,
    /// Pearson r between the covariate and `cnt`.
    pub correlation: Option<f64>,
}

/// The complete output of [`analyze_dashboard`].
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub sources: DataSources,
    pub daily_profile: TableProfile,
    pub hourly_profile: TableProfile,
    /// Recency/frequency/monetary per weekday, Sunday first.
    pub weekday: Vec<WeekdayAggregate>,
    pub weekday_totals: Vec<(Weekday, u64)>,
    pub distribution: Distribution,
    /// Pairwise Pearson over the numeric daily columns.
    pub correlation: CorrelationMatrix,
    pub scatter: Vec<ScatterSeries>,
    pub hourly: Vec<HourProfile>,
    pub total_rentals: u64,
    pub metadata: AnalysisMetadata,
}

impl DashboardData {
    pub fn busiest_weekday(&self) -> Option<Weekday> {
        WeekdayAggregator::busiest(&self.weekday)
    }

    pub fn quietest_weekday(&self) -> Option<Weekday> {
        WeekdayAggregator::quietest(&self.weekday)
    }

    pub fn peak_hour(&self) -> Option<u8> {
        HourlyAggregator::peak_hour(&self.hourly)
    }

    /// Scatter series for `factor`, if present.
    pub fn scatter_for(&self, factor: WeatherFactor) -> Option<&ScatterSeries> {
        self.scatter.iter().find(|s| s.factor == factor)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline: load → normalize → aggregate → derive series.
///
/// Any load failure is returned unchanged; nothing is retried and no partial
/// result is produced.
pub fn analyze_dashboard(sources: &DataSources, options: AnalysisOptions) -> Result<DashboardData> {
    info!(
        "Analyzing {} and {}",
        sources.day.display(),
        sources.hour.display()
    );

    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let datasets = load_datasets(sources, options.head_rows)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Aggregate ─────────────────────────────────────────────────────
    let transform_start = std::time::Instant::now();
    let daily = &datasets.daily.records;

    let weekday = WeekdayAggregator::aggregate(daily);
    let weekday_totals = WeekdayAggregator::totals(&weekday);
    let hourly = HourlyAggregator::profile(&datasets.hourly.records);

    let counts: Vec<f64> = daily.iter().map(|r| f64::from(r.cnt)).collect();
    let distribution = Distribution::from_values(&counts, options.bins);
    let correlation = numeric_correlations(daily);
    let scatter = WeatherFactor::ALL
        .iter()
        .map(|&factor| scatter_series(daily, factor, &counts))
        .collect();
    let total_rentals = daily.iter().map(|r| u64::from(r.cnt)).sum();
    let transform_time = transform_start.elapsed().as_secs_f64();

    debug!(
        "Loaded in {:.3}s, aggregated in {:.3}s",
        load_time, transform_time
    );

    // ── Step 3: Build result ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        daily_rows: datasets.daily.len(),
        hourly_rows: datasets.hourly.len(),
        first_date: daily.iter().map(|r| r.dteday).min(),
        last_date: daily.iter().map(|r| r.dteday).max(),
        weekday_mismatches: datasets.daily.weekday_mismatches
            + datasets.hourly.weekday_mismatches,
        load_time_seconds: load_time,
        transform_time_seconds: transform_time,
    };

    info!(
        "Dashboard ready: {} daily rows, {} hourly rows",
        metadata.daily_rows, metadata.hourly_rows
    );

    Ok(DashboardData {
        sources: sources.clone(),
        daily_profile: datasets.daily.profile,
        hourly_profile: datasets.hourly.profile,
        weekday,
        weekday_totals,
        distribution,
        correlation,
        scatter,
        hourly,
        total_rentals,
        metadata,
    })
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Correlation matrix over [`DAILY_NUMERIC_COLUMNS`].
fn numeric_correlations(records: &[DailyRecord]) -> CorrelationMatrix {
    let mut columns: Vec<(&str, Vec<f64>)> = DAILY_NUMERIC_COLUMNS
        .iter()
        .map(|&name| (name, Vec::with_capacity(records.len())))
        .collect();
    for record in records {
        for (column, value) in columns.iter_mut().zip(record.numeric_values()) {
            column.1.push(value);
        }
    }
    correlation_matrix(&columns)
}

fn scatter_series(records: &[DailyRecord], factor: WeatherFactor, counts: &[f64]) -> ScatterSeries {
    let xs: Vec<f64> = records.iter().map(|r| factor.value(r)).collect();
    ScatterSeries {
        factor,
        correlation: pearson(&xs, counts),
        points: xs.into_iter().zip(counts.iter().copied()).collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const DAY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,\
weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    const HOUR_HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,\
weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    fn write_csv(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    /// Two weeks from 2011-01-01 (a Saturday); warmer days rent more and the
    /// evening hour outrents the morning one.
    fn fixture(dir: &Path) -> DataSources {
        let start = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let mut day = vec![DAY_HEADER.to_string()];
        let mut hour = vec![HOUR_HEADER.to_string()];
        for i in 0..14u32 {
            let date = start + chrono::Duration::days(i64::from(i));
            let weekday = bikeshare_core::dates::weekday_code(date);
            let working = u8::from((1..=5).contains(&weekday));
            let temp = 0.2 + f64::from(i) * 0.02;
            let hum = 0.9 - f64::from(i) * 0.01;
            let wind = 0.1 + f64::from(i % 3) * 0.05;
            let cnt = 1_000 + i * 100;
            day.push(format!(
                "{},{},1,0,1,0,{weekday},{working},1,{temp},{temp},{hum},{wind},100,{},{cnt}",
                i + 1,
                date,
                cnt - 100
            ));
            for (slot, hr) in [8u32, 17].into_iter().enumerate() {
                let hour_cnt = if hr == 8 { cnt / 4 } else { cnt / 2 };
                hour.push(format!(
                    "{},{},1,0,1,{hr},0,{weekday},{working},1,{temp},{temp},{hum},{wind},1,{},{}",
                    i * 2 + slot as u32 + 1,
                    date,
                    hour_cnt - 1,
                    hour_cnt
                ));
            }
        }
        DataSources::new(
            write_csv(dir, "day.csv", &day),
            write_csv(dir, "hour.csv", &hour),
        )
    }

    // ── analyze_dashboard ─────────────────────────────────────────────────────

    #[test]
    fn test_analyze_dashboard_basic_pipeline() {
        let dir = TempDir::new().unwrap();
        let data = analyze_dashboard(&fixture(dir.path()), AnalysisOptions::default()).unwrap();

        assert_eq!(data.metadata.daily_rows, 14);
        assert_eq!(data.metadata.hourly_rows, 28);
        assert_eq!(data.weekday.len(), 7);
        assert_eq!(data.weekday_totals.len(), 7);
        assert_eq!(data.hourly.len(), 24);
        assert!(data.weekday.iter().all(|a| a.frequency == 2));
        // 14 days of 1000 + 100·i.
        assert_eq!(data.total_rentals, 14 * 1_000 + 100 * (0..14).sum::<u64>());
    }

    #[test]
    fn test_analyze_dashboard_metadata_fields_populated() {
        let dir = TempDir::new().unwrap();
        let data = analyze_dashboard(&fixture(dir.path()), AnalysisOptions::default()).unwrap();

        assert!(!data.metadata.generated_at.is_empty());
        assert!(data.metadata.load_time_seconds >= 0.0);
        assert!(data.metadata.transform_time_seconds >= 0.0);
        assert_eq!(data.metadata.first_date, NaiveDate::from_ymd_opt(2011, 1, 1));
        assert_eq!(data.metadata.last_date, NaiveDate::from_ymd_opt(2011, 1, 14));
        assert_eq!(data.metadata.weekday_mismatches, 0);
    }

    #[test]
    fn test_analyze_dashboard_histogram_matches_bins() {
        let dir = TempDir::new().unwrap();
        let options = AnalysisOptions {
            bins: 7,
            head_rows: 3,
        };
        let data = analyze_dashboard(&fixture(dir.path()), options).unwrap();

        assert_eq!(data.distribution.bins.len(), 7);
        let total: usize = data.distribution.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 14);
        assert_eq!(data.distribution.density.len(), DENSITY_POINTS);
        assert_eq!(data.daily_profile.head.len(), 3);
        assert_eq!(data.hourly_profile.head.len(), 3);
    }

    #[test]
    fn test_analyze_dashboard_correlations() {
        let dir = TempDir::new().unwrap();
        let data = analyze_dashboard(&fixture(dir.path()), AnalysisOptions::default()).unwrap();

        assert_eq!(data.correlation.size(), 15);
        let r = data.correlation.between("temp", "cnt").unwrap();
        assert!((r - 1.0).abs() < 1e-9, "temp and cnt rise together: {r}");
        // season is constant in the fixture.
        assert_eq!(data.correlation.between("season", "cnt"), None);

        let temp = data.scatter_for(WeatherFactor::Temperature).unwrap();
        assert_eq!(temp.points.len(), 14);
        assert!((temp.points[0].0 - 0.2 * 41.0).abs() < 1e-9);
        let hum = data.scatter_for(WeatherFactor::Humidity).unwrap();
        assert!(hum.correlation.unwrap() < 0.0);
    }

    #[test]
    fn test_analyze_dashboard_busiest_and_peak() {
        let dir = TempDir::new().unwrap();
        let data = analyze_dashboard(&fixture(dir.path()), AnalysisOptions::default()).unwrap();

        // Fridays (7th and 14th) rent the most, Saturdays the least.
        assert_eq!(data.busiest_weekday(), Some(Weekday::Friday));
        assert_eq!(data.quietest_weekday(), Some(Weekday::Saturday));
        assert_eq!(data.peak_hour(), Some(17));
    }

    #[test]
    fn test_analyze_dashboard_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let sources = DataSources::new(dir.path().join("day.csv"), dir.path().join("hour.csv"));
        assert!(analyze_dashboard(&sources, AnalysisOptions::default()).is_err());
    }

    #[test]
    fn test_analyze_dashboard_empty_files() {
        let dir = TempDir::new().unwrap();
        let sources = DataSources::new(
            write_csv(dir.path(), "day.csv", &[]),
            write_csv(dir.path(), "hour.csv", &[]),
        );

        let data = analyze_dashboard(&sources, AnalysisOptions::default()).unwrap();
        assert_eq!(data.metadata.daily_rows, 0);
        assert_eq!(data.total_rentals, 0);
        assert!(data.distribution.summary.is_none());
        assert!(data.distribution.bins.is_empty());
        assert!(data.weekday.iter().all(|a| a.recency.is_none()));
        assert_eq!(data.busiest_weekday(), None);
        assert_eq!(data.metadata.first_date, None);
    }

    // ── Distribution ──────────────────────────────────────────────────────────

    #[test]
    fn test_distribution_density_scaled_to_counts() {
        let values: Vec<f64> = (0..100).map(|i| f64::from(i % 10)).collect();
        let dist = Distribution::from_values(&values, 10);

        // Area under the scaled curve ≈ n · bin width.
        let step = dist.density[1].0 - dist.density[0].0;
        let area: f64 = dist.density.iter().map(|(_, d)| d * step).sum();
        let expected = 100.0 * dist.bins[0].width();
        assert!((area - expected).abs() / expected < 0.05, "area {area}");
        assert_eq!(dist.max_count(), 10);
    }
}
