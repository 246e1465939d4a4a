//! Fixed captions and conclusion text shown alongside the charts.
//!
//! Captions that depend on the data (missing values, busiest weekday) are
//! built by the small functions at the bottom; everything else is static.

use bikeshare_core::models::{TableProfile, Weekday};

// ── Overview ──────────────────────────────────────────────────────────────────

pub const DAILY_PREVIEW_TITLE: &str = "Daily data";
pub const DAILY_PREVIEW_CAPTION: &str = "The daily dataset holds total bike rentals, weather \
conditions and other calendar information for each day.";

pub const HOURLY_PREVIEW_TITLE: &str = "Hourly data";
pub const HOURLY_PREVIEW_CAPTION: &str = "The hourly dataset gives a finer view of rentals \
within each day.";

// ── Exploratory analysis ──────────────────────────────────────────────────────

pub const DISTRIBUTION_TITLE: &str = "Distribution of total rentals (cnt)";
pub const DISTRIBUTION_CAPTION: &str = "Daily rentals follow a bell-shaped distribution, with \
most days between 3,000 and 5,000 rentals.";

pub const HEATMAP_TITLE: &str = "Correlation heatmap, daily data";
pub const HEATMAP_CAPTION: &str = "Temperature (temp) correlates strongly with total rentals \
(cnt). Other weather variables such as humidity (hum) show a moderate relationship.";

pub const HOURLY_TITLE: &str = "Mean rentals by hour of day";
pub const HOURLY_CAPTION: &str = "Working days peak around the morning and evening commutes; \
non-working days rise slowly to a single midday peak.";

// ── Aggregate analysis ────────────────────────────────────────────────────────

pub const RFM_TITLE: &str = "RFM metrics by weekday";
pub const RFM_CAPTION: &str = "RFM analysis shows rental patterns by day of the week. Recency \
is the number of days since that weekday last occurred, Monetary is the total number of \
rentals, and Frequency is the number of days observed.";

pub const WEEKDAY_BAR_TITLE: &str = "Total rentals by weekday";

// ── Conclusions ───────────────────────────────────────────────────────────────

pub const TREND_TITLE: &str = "Rental trend by weekday";
pub const TREND_CAPTION: &str = "Rentals differ across the week, reflecting how the mix of \
leisure and commuting trips changes from working days to the weekend.";

pub const WEATHER_TITLE: &str = "Effect of weather on rentals";
pub const TEMPERATURE_CAPTION: &str = "Higher temperatures go with more rentals: people ride \
more when it is warmer.";
pub const HUMIDITY_CAPTION: &str = "Humidity is negatively related to rentals; humid days are \
less comfortable for cycling.";
pub const WINDSPEED_CAPTION: &str = "Stronger wind tends to reduce rentals, for comfort and \
safety reasons.";

pub const DISTRIBUTION_BY_DAY_TITLE: &str = "Rental distribution by weekday";

pub const SUMMARY_TITLE: &str = "Summary of findings";

/// Closing narrative: `(heading, paragraphs)` blocks, rendered in order.
pub const SUMMARY: &[(&str, &[&str])] = &[
    (
        "1. Effect of weather (temperature, humidity, wind speed) on daily and hourly use",
        &[
            "Temperature (temp): higher temperatures have a strong positive correlation with \
the number of rentals. People are more likely to ride when it is warmer, which goes with \
more outdoor activity such as cycling for leisure or transport.",
            "Humidity (hum): humidity also matters, although more moderately. Higher humidity \
usually comes with hot, muggy weather that makes cycling less comfortable, so rentals tend \
to drop slightly on very humid days.",
            "Wind speed (windspeed): very strong wind reduces cycling comfort, although the \
effect is weaker than temperature. On very windy days rentals tend to be lower for comfort \
and safety reasons.",
        ],
    ),
    (
        "2. Usage patterns on working days and weekends",
        &[
            "Weekend: leisure riding makes up a larger share of weekend trips, when people \
have more free time to cycle for exercise or recreation.",
            "Working days (Monday to Friday): use is steadier and driven by daily transport \
needs such as commuting to work or school. Cycling on working days is more functional, \
while weekend cycling is more recreational.",
        ],
    ),
    (
        "Key points",
        &[
            "Weather: higher temperatures increase rentals, while high humidity and strong \
wind reduce them.",
            "Usage pattern: the hourly profile separates commuting peaks on working days \
from the leisure pattern of non-working days.",
            "Promotion strategy: weather-based promotions, such as discounts on warm days or \
weekend programmes, could encourage further bike use.",
        ],
    ),
];

// ── Data-dependent captions ───────────────────────────────────────────────────

/// Caption under a column-information table.
pub fn missing_values_caption(dataset: &str, profile: &TableProfile) -> String {
    match profile.total_nulls() {
        0 => format!(
            "The {} dataset has no missing values, so the data is ready for analysis.",
            dataset
        ),
        n => format!(
            "The {} dataset has {} missing values; review them before drawing conclusions.",
            dataset, n
        ),
    }
}

/// Caption under the weekday bar charts.
pub fn weekday_bar_caption(busiest: Option<Weekday>, quietest: Option<Weekday>) -> String {
    match (busiest, quietest) {
        (Some(b), Some(q)) if b != q => format!(
            "{} has the highest total rentals and {} the lowest.",
            b, q
        ),
        (Some(b), _) => format!("{} has the highest total rentals.", b),
        _ => "No rentals recorded.".to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{ColumnProfile, ColumnType};

    fn profile(nulls: usize) -> TableProfile {
        TableProfile {
            columns: vec![ColumnProfile {
                name: "cnt".to_string(),
                dtype: ColumnType::Int64,
                null_count: nulls,
            }],
            head: Vec::new(),
            row_count: 3,
        }
    }

    #[test]
    fn test_missing_values_caption() {
        assert!(missing_values_caption("daily", &profile(0)).contains("no missing values"));
        assert!(missing_values_caption("hourly", &profile(4)).contains("4 missing values"));
    }

    #[test]
    fn test_weekday_bar_caption() {
        assert_eq!(
            weekday_bar_caption(Some(Weekday::Friday), Some(Weekday::Sunday)),
            "Friday has the highest total rentals and Sunday the lowest."
        );
        assert_eq!(
            weekday_bar_caption(Some(Weekday::Monday), Some(Weekday::Monday)),
            "Monday has the highest total rentals."
        );
        assert_eq!(weekday_bar_caption(None, None), "No rentals recorded.");
    }

    #[test]
    fn test_summary_has_three_blocks() {
        assert_eq!(SUMMARY.len(), 3);
        assert!(SUMMARY.iter().all(|(_, paragraphs)| !paragraphs.is_empty()));
    }
}
