//! Chart widgets: rental histogram with density overlay, weekday line and bar
//! charts, hourly profile and weather scatter plots.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use bikeshare_core::formatting::{compact_number, format_coefficient, format_count};
use bikeshare_core::models::{HourProfile, Weekday};
use bikeshare_data::analysis::{Distribution, ScatterSeries};

use crate::themes::Theme;

/// Vertical strokes drawn per histogram bin so bars read as filled columns.
const STROKES_PER_BIN: usize = 6;

// ── Axis helpers ──────────────────────────────────────────────────────────────

/// `[min, max]` of `values`, widened so a chart never gets a zero-width axis.
pub fn axis_bounds(values: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if min == max {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}

/// Bounds starting at zero, used for count axes.
pub fn count_bounds(max: f64) -> [f64; 2] {
    if max > 0.0 {
        [0.0, max * 1.1]
    } else {
        [0.0, 1.0]
    }
}

/// `n` evenly spaced tick labels across `bounds`.
pub fn axis_labels(bounds: [f64; 2], n: usize) -> Vec<String> {
    if n < 2 {
        return vec![compact_number(bounds[0])];
    }
    let step = (bounds[1] - bounds[0]) / (n - 1) as f64;
    (0..n)
        .map(|i| compact_number(bounds[0] + step * i as f64))
        .collect()
}

fn chart_block<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(title)
}

// ── Histogram ─────────────────────────────────────────────────────────────────

/// Histogram of daily rentals with the density curve on top.
pub fn render_histogram(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    distribution: &Distribution,
    theme: &Theme,
) {
    let strokes: Vec<(f64, f64)> = distribution
        .bins
        .iter()
        .flat_map(|bin| {
            let step = bin.width() / (STROKES_PER_BIN + 1) as f64;
            (1..=STROKES_PER_BIN).map(move |k| (bin.lower + step * k as f64, bin.count as f64))
        })
        .collect();

    let x_bounds = axis_bounds(
        distribution
            .bins
            .iter()
            .flat_map(|b| [b.lower, b.upper])
            .chain(distribution.density.iter().map(|p| p.0)),
    );
    let peak = distribution
        .density
        .iter()
        .map(|p| p.1)
        .fold(distribution.max_count() as f64, f64::max);
    let y_bounds = count_bounds(peak);

    let datasets = vec![
        Dataset::default()
            .name("days")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(theme.chart_histogram)
            .data(&strokes),
        Dataset::default()
            .name("density")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_density)
            .data(&distribution.density),
    ];

    let chart = Chart::new(datasets)
        .block(chart_block(format!(" {} ", title), theme))
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .title("Total rentals")
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, 5)),
        )
        .y_axis(
            Axis::default()
                .title("Frequency")
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, 3)),
        );

    frame.render_widget(chart, area);
}

// ── Weekday charts ────────────────────────────────────────────────────────────

/// Line chart of total rentals across the weekdays, in the order given.
pub fn render_weekday_line(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    totals: &[(Weekday, u64)],
    theme: &Theme,
) {
    let points: Vec<(f64, f64)> = totals
        .iter()
        .enumerate()
        .map(|(i, &(_, total))| (i as f64, total as f64))
        .collect();

    let x_bounds = [0.0, totals.len().saturating_sub(1).max(1) as f64];
    let y_bounds = count_bounds(points.iter().map(|p| p.1).fold(0.0, f64::max));

    let datasets = vec![
        Dataset::default()
            .name("total rentals")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_line)
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.chart_line)
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(chart_block(format!(" {} ", title), theme))
        .x_axis(
            Axis::default()
                .title("Weekday")
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(totals.iter().map(|(d, _)| d.short_label())),
        )
        .y_axis(
            Axis::default()
                .title("Total rentals")
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, 3)),
        );

    frame.render_widget(chart, area);
}

/// Bar chart of total rentals per weekday.
pub fn render_weekday_bars(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    totals: &[(Weekday, u64)],
    bar_style: Style,
    theme: &Theme,
) {
    let bars: Vec<Bar> = totals
        .iter()
        .map(|&(day, total)| {
            Bar::default()
                .value(total)
                .label(Line::from(day.short_label()))
                .text_value(compact_number(total as f64))
        })
        .collect();

    // Spread the bars over the inner width with a one-cell gap.
    let slots = totals.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / slots).saturating_sub(1).max(1);

    let chart = BarChart::default()
        .block(chart_block(format!(" {} ", title), theme))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(bar_style)
        .value_style(theme.value)
        .label_style(theme.label)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

// ── Hourly profile ────────────────────────────────────────────────────────────

fn hour_series(
    profiles: &[HourProfile],
    pick: impl Fn(&HourProfile) -> Option<f64>,
) -> Vec<(f64, f64)> {
    profiles
        .iter()
        .filter_map(|p| pick(p).map(|m| (f64::from(p.hour), m)))
        .collect()
}

/// Mean rentals per hour: overall, working days and non-working days.
pub fn render_hourly_profile(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    profiles: &[HourProfile],
    theme: &Theme,
) {
    let overall = hour_series(profiles, |p| p.mean);
    let working = hour_series(profiles, |p| p.mean_working_day);
    let off_day = hour_series(profiles, |p| p.mean_off_day);

    let y_bounds = count_bounds(
        overall
            .iter()
            .chain(&working)
            .chain(&off_day)
            .map(|p| p.1)
            .fold(0.0, f64::max),
    );
    let x_bounds = [0.0, 23.0];

    let datasets = vec![
        Dataset::default()
            .name("all days")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_line)
            .data(&overall),
        Dataset::default()
            .name("working days")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_working_day)
            .data(&working),
        Dataset::default()
            .name("non-working days")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_off_day)
            .data(&off_day),
    ];

    let chart = Chart::new(datasets)
        .block(chart_block(format!(" {} ", title), theme))
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .title("Hour")
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(["0", "6", "12", "18", "23"]),
        )
        .y_axis(
            Axis::default()
                .title("Mean rentals")
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, 3)),
        );

    frame.render_widget(chart, area);
}

// ── Scatter ───────────────────────────────────────────────────────────────────

/// One weather covariate against daily rentals, titled with Pearson r.
pub fn render_scatter(frame: &mut Frame, area: Rect, series: &ScatterSeries, theme: &Theme) {
    let x_bounds = axis_bounds(series.points.iter().map(|p| p.0));
    let y_bounds = count_bounds(series.points.iter().map(|p| p.1).fold(0.0, f64::max));

    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(theme.scatter_style(series.factor))
        .data(&series.points)];

    let title = format!(
        " {} · r = {} · n = {} ",
        series.factor.title(),
        format_coefficient(series.correlation),
        format_count(series.points.len() as u64)
    );

    let chart = Chart::new(datasets)
        .block(chart_block(title, theme))
        .x_axis(
            Axis::default()
                .title(series.factor.axis_label())
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, 3)),
        )
        .y_axis(
            Axis::default()
                .title("Rentals")
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, 3)),
        );

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, empty_dashboard, sample_dashboard};
    use bikeshare_data::analysis::WeatherFactor;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(width: u16, height: u16, f: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(f).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    // ── axis helpers ──────────────────────────────────────────────────────────

    #[test]
    fn test_axis_bounds_empty_and_constant() {
        assert_eq!(axis_bounds(Vec::<f64>::new()), [0.0, 1.0]);
        assert_eq!(axis_bounds(vec![5.0, 5.0]), [4.0, 6.0]);
        assert_eq!(axis_bounds(vec![3.0, -1.0, 8.0]), [-1.0, 8.0]);
    }

    #[test]
    fn test_axis_bounds_ignores_non_finite() {
        assert_eq!(axis_bounds(vec![f64::NAN, 2.0, 4.0]), [2.0, 4.0]);
    }

    #[test]
    fn test_count_bounds() {
        assert_eq!(count_bounds(0.0), [0.0, 1.0]);
        let b = count_bounds(100.0);
        assert_eq!(b[0], 0.0);
        assert!(b[1] > 100.0);
    }

    #[test]
    fn test_axis_labels_evenly_spaced() {
        assert_eq!(axis_labels([0.0, 2000.0], 3), vec!["0", "1.0k", "2.0k"]);
        assert_eq!(axis_labels([7.0, 9.0], 1), vec!["7"]);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_histogram_does_not_panic() {
        let data = sample_dashboard();
        let theme = Theme::dark();
        let text = draw(80, 20, |frame| {
            let area = frame.area();
            render_histogram(frame, area, "Distribution", &data.distribution, &theme);
        });
        assert!(text.contains("Distribution"));
    }

    #[test]
    fn test_render_histogram_empty_does_not_panic() {
        let data = empty_dashboard();
        let theme = Theme::classic();
        draw(80, 20, |frame| {
            let area = frame.area();
            render_histogram(frame, area, "Distribution", &data.distribution, &theme);
        });
    }

    #[test]
    fn test_render_weekday_line_labels() {
        let data = sample_dashboard();
        let theme = Theme::dark();
        let text = draw(90, 20, |frame| {
            let area = frame.area();
            render_weekday_line(frame, area, "Trend", &data.weekday_totals, &theme);
        });
        assert!(text.contains("Sun"));
        assert!(text.contains("Sat"));
    }

    #[test]
    fn test_render_weekday_bars_labels() {
        let data = sample_dashboard();
        let theme = Theme::light();
        let text = draw(90, 20, |frame| {
            let area = frame.area();
            render_weekday_bars(
                frame,
                area,
                "Totals",
                &data.weekday_totals,
                theme.chart_bar,
                &theme,
            );
        });
        assert!(text.contains("Wed"));
        assert!(text.contains("19.0k"));
    }

    #[test]
    fn test_render_weekday_bars_narrow_area() {
        let data = sample_dashboard();
        let theme = Theme::dark();
        draw(10, 6, |frame| {
            let area = frame.area();
            render_weekday_bars(frame, area, "T", &data.weekday_totals, theme.chart_bar, &theme);
        });
    }

    #[test]
    fn test_render_hourly_profile_does_not_panic() {
        let theme = Theme::dark();
        for data in [sample_dashboard(), empty_dashboard()] {
            draw(80, 20, |frame| {
                let area = frame.area();
                render_hourly_profile(frame, area, "Hourly", &data.hourly, &theme);
            });
        }
    }

    #[test]
    fn test_render_scatter_title_has_correlation() {
        let data = sample_dashboard();
        let theme = Theme::dark();
        let series = data.scatter_for(WeatherFactor::Temperature).unwrap();
        let text = draw(80, 20, |frame| {
            let area = frame.area();
            render_scatter(frame, area, series, &theme);
        });
        assert!(text.contains("r = 1.00"), "got:\n{text}");
    }

    #[test]
    fn test_render_scatter_empty_shows_missing() {
        let data = empty_dashboard();
        let theme = Theme::dark();
        let series = &data.scatter[0];
        let text = draw(80, 20, |frame| {
            let area = frame.area();
            render_scatter(frame, area, series, &theme);
        });
        assert!(text.contains("r = n/a"));
    }
}
