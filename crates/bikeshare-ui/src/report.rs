//! Plain-text rendering of all four dashboard tabs, for `--view report`.

use std::fmt::Write;

use bikeshare_core::formatting::{compact_number, format_coefficient, format_count, format_days, MISSING};
use bikeshare_core::models::TableProfile;
use bikeshare_data::analysis::DashboardData;

use crate::app::Tab;
use crate::components::header::{SPARKLES, TITLE};
use crate::narrative;
use crate::table_view::fit_width;
use crate::views::{conclusions, eda, overview};

/// Width of the text bars in the weekday chart.
const BAR_WIDTH: usize = 40;

/// Render every tab as plain text.
pub fn render_report(data: &DashboardData) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, data);
    out
}

fn write_report(out: &mut String, data: &DashboardData) -> std::fmt::Result {
    writeln!(out, "{} {} {}", SPARKLES, TITLE, SPARKLES)?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(
        out,
        "[ {} | {} ]",
        data.sources.day.display(),
        data.sources.hour.display()
    )?;

    // ── Overview ──
    tab_heading(out, Tab::Overview)?;
    section(out, narrative::DAILY_PREVIEW_TITLE)?;
    write_head(out, &data.daily_profile)?;
    writeln!(out, "{}", narrative::DAILY_PREVIEW_CAPTION)?;
    section(out, narrative::HOURLY_PREVIEW_TITLE)?;
    write_head(out, &data.hourly_profile)?;
    writeln!(out, "{}", narrative::HOURLY_PREVIEW_CAPTION)?;

    section(out, "Column information")?;
    for (name, profile) in [("daily", &data.daily_profile), ("hourly", &data.hourly_profile)] {
        writeln!(out, "{:<12} {:<16} {:>14}", "Column", "Data type", "Missing values")?;
        for col in &profile.columns {
            writeln!(out, "{:<12} {:<16} {:>14}", col.name, col.dtype, col.null_count)?;
        }
        writeln!(out, "{}", narrative::missing_values_caption(name, profile))?;
        writeln!(out)?;
    }

    section(out, "Key metrics")?;
    for (label, value) in overview::key_metrics(data) {
        writeln!(out, "{:<22}{}", format!("{}:", label), value)?;
    }

    // ── Exploratory analysis ──
    tab_heading(out, Tab::Exploratory)?;
    section(out, narrative::DISTRIBUTION_TITLE)?;
    writeln!(out, "{}", eda::summary_text(data.distribution.summary.as_ref()))?;
    let tallest = data.distribution.max_count();
    for bin in &data.distribution.bins {
        writeln!(
            out,
            "{:>8} – {:<8} {:>4} {}",
            compact_number(bin.lower),
            compact_number(bin.upper),
            bin.count,
            bar(bin.count as f64, tallest as f64)
        )?;
    }
    writeln!(out, "{}", narrative::DISTRIBUTION_CAPTION)?;

    section(out, narrative::HEATMAP_TITLE)?;
    let matrix = &data.correlation;
    write!(out, "{:<10}", "")?;
    for name in &matrix.columns {
        write!(out, " {:>5}", fit_width(name, 5))?;
    }
    writeln!(out)?;
    for (i, name) in matrix.columns.iter().enumerate() {
        write!(out, "{:<10}", fit_width(name, 10))?;
        for j in 0..matrix.size() {
            write!(out, " {:>5}", format_coefficient(matrix.get(i, j)))?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", narrative::HEATMAP_CAPTION)?;

    section(out, narrative::HOURLY_TITLE)?;
    writeln!(out, "{:>4} {:>10} {:>12} {:>16}", "Hour", "All days", "Working days", "Non-working days")?;
    let mean = |v: Option<f64>| v.map(|m| format!("{:.1}", m)).unwrap_or_else(|| MISSING.to_string());
    for p in &data.hourly {
        writeln!(
            out,
            "{:>4} {:>10} {:>12} {:>16}",
            p.hour,
            mean(p.mean),
            mean(p.mean_working_day),
            mean(p.mean_off_day)
        )?;
    }
    writeln!(out, "{}", eda::hourly_caption(data))?;

    // ── Aggregate analysis ──
    tab_heading(out, Tab::Aggregate)?;
    section(out, narrative::RFM_TITLE)?;
    writeln!(out, "{:<10} {:>14} {:>12} {:>10}", "Weekday", "Recency (days)", "Monetary", "Frequency")?;
    for agg in &data.weekday {
        writeln!(
            out,
            "{:<10} {:>14} {:>12} {:>10}",
            agg.label,
            format_days(agg.recency),
            format_count(agg.monetary),
            agg.frequency
        )?;
    }
    writeln!(out, "{}", narrative::RFM_CAPTION)?;

    section(out, narrative::WEEKDAY_BAR_TITLE)?;
    write_weekday_bars(out, data)?;

    // ── Conclusions ──
    tab_heading(out, Tab::Conclusions)?;
    section(out, narrative::TREND_TITLE)?;
    let trend: Vec<String> = data
        .weekday_totals
        .iter()
        .map(|(day, total)| format!("{} {}", day.short_label(), compact_number(*total as f64)))
        .collect();
    writeln!(out, "{}", trend.join(" → "))?;
    writeln!(out, "{}", narrative::TREND_CAPTION)?;

    section(out, narrative::WEATHER_TITLE)?;
    for series in &data.scatter {
        writeln!(
            out,
            "{}: r = {} over {} days",
            series.factor.title(),
            format_coefficient(series.correlation),
            format_count(series.points.len() as u64)
        )?;
        writeln!(out, "  {}", conclusions::weather_caption(series.factor))?;
    }

    section(out, narrative::DISTRIBUTION_BY_DAY_TITLE)?;
    write_weekday_bars(out, data)?;

    section(out, narrative::SUMMARY_TITLE)?;
    for (heading, paragraphs) in narrative::SUMMARY {
        writeln!(out, "{}", heading)?;
        for paragraph in *paragraphs {
            writeln!(out, "  • {}", paragraph)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn tab_heading(out: &mut String, tab: Tab) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", tab.title().to_uppercase())?;
    writeln!(out, "{}", "-".repeat(60))
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "## {}", title)
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}

fn write_head(out: &mut String, profile: &TableProfile) -> std::fmt::Result {
    if profile.columns.is_empty() {
        return writeln!(out, "(no rows)");
    }
    writeln!(out, "{}", profile.column_names().join(","))?;
    for row in &profile.head {
        writeln!(out, "{}", row.join(","))?;
    }
    writeln!(out, "... {} rows", format_count(profile.row_count as u64))
}

fn write_weekday_bars(out: &mut String, data: &DashboardData) -> std::fmt::Result {
    let max = data.weekday_totals.iter().map(|(_, t)| *t).max().unwrap_or(0);
    for (day, total) in &data.weekday_totals {
        writeln!(
            out,
            "{:<10} {:>12} {}",
            day.label(),
            format_count(*total),
            bar(*total as f64, max as f64)
        )?;
    }
    writeln!(
        out,
        "{}",
        narrative::weekday_bar_caption(data.busiest_weekday(), data.quietest_weekday())
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
