//! Overview tab: dataset previews, column information and key metrics.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Text,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use bikeshare_core::formatting::{format_count, format_date_range, format_number, MISSING};
use bikeshare_data::analysis::DashboardData;

use super::{metric_line, with_caption};
use crate::narrative;
use crate::table_view::{render_head_table, render_schema_table};
use crate::themes::Theme;

pub const SECTIONS: [&str; 3] = ["Dataset preview", "Column information", "Key metrics"];

/// Headline figures as `(label, value)` pairs, shared with the text report.
pub fn key_metrics(data: &DashboardData) -> Vec<(&'static str, String)> {
    let meta = &data.metadata;
    vec![
        ("Daily rows", format_count(meta.daily_rows as u64)),
        ("Hourly rows", format_count(meta.hourly_rows as u64)),
        ("Date range", format_date_range(meta.first_date, meta.last_date)),
        ("Total rentals", format_count(data.total_rentals)),
        (
            "Mean rentals per day",
            data.distribution
                .summary
                .as_ref()
                .map(|s| format_number(s.mean, 1))
                .unwrap_or_else(|| MISSING.to_string()),
        ),
        (
            "Busiest weekday",
            data.busiest_weekday()
                .map(|d| d.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        ),
        (
            "Peak hour",
            data.peak_hour()
                .map(|h| format!("{:02}:00", h))
                .unwrap_or_else(|| MISSING.to_string()),
        ),
        ("Weekday mismatches", format_count(meta.weekday_mismatches as u64)),
        (
            "Load time",
            format!(
                "{} s (+{} s transform)",
                format_number(meta.load_time_seconds, 3),
                format_number(meta.transform_time_seconds, 3)
            ),
        ),
    ]
}

/// Draw `section` of the overview tab.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    data: &DashboardData,
    section: usize,
    scroll: u16,
    theme: &Theme,
) {
    match section {
        0 => render_preview(frame, area, data, theme),
        1 => render_columns(frame, area, data, theme),
        _ => render_metrics(frame, area, data, scroll, theme),
    }
}

fn render_preview(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let body = with_caption(frame, top, narrative::DAILY_PREVIEW_CAPTION, theme);
    render_head_table(
        frame,
        body,
        narrative::DAILY_PREVIEW_TITLE,
        &data.daily_profile,
        theme,
    );

    let body = with_caption(frame, bottom, narrative::HOURLY_PREVIEW_CAPTION, theme);
    render_head_table(
        frame,
        body,
        narrative::HOURLY_PREVIEW_TITLE,
        &data.hourly_profile,
        theme,
    );
}

fn render_columns(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let caption = narrative::missing_values_caption("daily", &data.daily_profile);
    let body = with_caption(frame, left, &caption, theme);
    render_schema_table(frame, body, "Daily columns", &data.daily_profile, theme);

    let caption = narrative::missing_values_caption("hourly", &data.hourly_profile);
    let body = with_caption(frame, right, &caption, theme);
    render_schema_table(frame, body, "Hourly columns", &data.hourly_profile, theme);
}

fn render_metrics(frame: &mut Frame, area: Rect, data: &DashboardData, scroll: u16, theme: &Theme) {
    let lines: Vec<_> = key_metrics(data)
        .into_iter()
        .map(|(label, value)| metric_line(label, value, theme))
        .collect();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Key metrics "),
        )
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, empty_dashboard, sample_dashboard};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(data: &DashboardData, section: usize) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, data, section, 0, &theme);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_key_metrics_sample() {
        let data = sample_dashboard();
        let metrics = key_metrics(&data);
        let get = |name: &str| {
            metrics
                .iter()
                .find(|(label, _)| *label == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("Daily rows"), "28");
        assert_eq!(get("Date range"), "2011-01-01 → 2011-01-28");
        assert_eq!(get("Busiest weekday"), "Saturday");
        assert_eq!(get("Peak hour"), "23:00");
    }

    #[test]
    fn test_key_metrics_empty_uses_placeholder() {
        let metrics = key_metrics(&empty_dashboard());
        let busiest = metrics.iter().find(|(l, _)| *l == "Busiest weekday").unwrap();
        assert_eq!(busiest.1, MISSING);
        let range = metrics.iter().find(|(l, _)| *l == "Date range").unwrap();
        assert_eq!(range.1, MISSING);
    }

    #[test]
    fn test_render_preview_shows_both_tables() {
        let text = draw(&sample_dashboard(), 0);
        assert!(text.contains(narrative::DAILY_PREVIEW_TITLE));
        assert!(text.contains(narrative::HOURLY_PREVIEW_TITLE));
        assert!(text.contains("672 rows"));
    }

    #[test]
    fn test_render_columns_shows_caption() {
        let text = draw(&sample_dashboard(), 1);
        assert!(text.contains("datetime64[ns]"));
        assert!(text.contains("no missing"));
    }

    #[test]
    fn test_render_metrics_lists_totals() {
        let text = draw(&sample_dashboard(), 2);
        assert!(text.contains("Total rentals"));
        assert!(text.contains("Saturday"));
    }

    #[test]
    fn test_render_empty_dashboard_every_section() {
        let data = empty_dashboard();
        for section in 0..SECTIONS.len() {
            draw(&data, section);
        }
    }
}
