//! Conclusions tab: weekday trend, weather effects, weekday distribution and
//! the closing summary.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use bikeshare_data::analysis::{DashboardData, WeatherFactor};

use super::with_caption;
use crate::components::charts;
use crate::narrative;
use crate::table_view::render_no_data;
use crate::themes::Theme;

pub const SECTIONS: [&str; 4] = [
    "Weekday trend",
    "Weather effects",
    "Weekday distribution",
    "Summary",
];

/// Fixed caption for a weather scatter plot.
pub fn weather_caption(factor: WeatherFactor) -> &'static str {
    match factor {
        WeatherFactor::Temperature => narrative::TEMPERATURE_CAPTION,
        WeatherFactor::Humidity => narrative::HUMIDITY_CAPTION,
        WeatherFactor::Windspeed => narrative::WINDSPEED_CAPTION,
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    data: &DashboardData,
    section: usize,
    scroll: u16,
    theme: &Theme,
) {
    match section {
        0 => {
            let body = with_caption(frame, area, narrative::TREND_CAPTION, theme);
            charts::render_weekday_line(
                frame,
                body,
                narrative::TREND_TITLE,
                &data.weekday_totals,
                theme,
            );
        }
        1 => render_weather(frame, area, data, theme),
        2 => {
            let caption =
                narrative::weekday_bar_caption(data.busiest_weekday(), data.quietest_weekday());
            let body = with_caption(frame, area, &caption, theme);
            charts::render_weekday_bars(
                frame,
                body,
                narrative::DISTRIBUTION_BY_DAY_TITLE,
                &data.weekday_totals,
                theme.chart_bar_alt,
                theme,
            );
        }
        _ => render_summary(frame, area, scroll, theme),
    }
}

fn render_weather(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    for (factor, column) in WeatherFactor::ALL.into_iter().zip(columns.iter()) {
        let body = with_caption(frame, *column, weather_caption(factor), theme);
        match data.scatter_for(factor) {
            Some(series) => charts::render_scatter(frame, body, series, theme),
            None => render_no_data(frame, body, factor.title(), theme),
        }
    }
}

/// The closing narrative as styled lines.
pub fn summary_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (heading, paragraphs) in narrative::SUMMARY {
        lines.push(Line::from(Span::styled(*heading, theme.bold)));
        for paragraph in *paragraphs {
            lines.push(Line::from(vec![
                Span::styled("  • ", theme.dim),
                Span::styled(*paragraph, theme.text),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn render_summary(frame: &mut Frame, area: Rect, scroll: u16, theme: &Theme) {
    let paragraph = Paragraph::new(Text::from(summary_lines(theme)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", narrative::SUMMARY_TITLE)),
        )
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
