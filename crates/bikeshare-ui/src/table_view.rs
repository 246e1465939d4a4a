//! Table widgets for the dashboard: dataset previews, column information and
//! the weekday RFM table.
//!
//! Each renders a bordered [`ratatui::widgets::Table`] into the given area.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use bikeshare_core::formatting;
use bikeshare_core::models::{TableProfile, Weekday, WeekdayAggregate};

use crate::themes::Theme;

/// Widest a preview column may grow, in terminal cells.
const MAX_PREVIEW_WIDTH: usize = 12;

/// Truncate `text` to at most `width` terminal cells, marking the cut with `…`.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn bordered(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" {} ", title))
}

fn row_style(i: usize, theme: &Theme) -> ratatui::style::Style {
    if i % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

/// Render the first rows of a file exactly as read, one column per field.
pub fn render_head_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    profile: &TableProfile,
    theme: &Theme,
) {
    let names = profile.column_names();
    if names.is_empty() {
        render_no_data(frame, area, title, theme);
        return;
    }

    // Column width: widest of header and values, capped.
    let widths: Vec<usize> = names
        .iter()
        .enumerate()
        .map(|(col, name)| {
            profile
                .head
                .iter()
                .filter_map(|row| row.get(col))
                .map(|v| v.width())
                .chain(std::iter::once(name.width()))
                .max()
                .unwrap_or(1)
                .min(MAX_PREVIEW_WIDTH)
        })
        .collect();

    let header = Row::new(
        names
            .iter()
            .zip(&widths)
            .map(|(name, &w)| Cell::from(fit_width(name, w)).style(theme.table_header)),
    );

    let rows: Vec<Row> = profile
        .head
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(
                row.iter()
                    .zip(&widths)
                    .map(|(value, &w)| Cell::from(fit_width(value, w))),
            )
            .style(row_style(i, theme))
        })
        .collect();

    let constraints: Vec<Constraint> = widths
        .iter()
        .map(|&w| Constraint::Length(w as u16))
        .collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(1)
        .block(bordered(
            &format!("{} · {} rows", title, formatting::format_count(profile.row_count as u64)),
            theme,
        ))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the inferred type and missing-value count of every column.
pub fn render_schema_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    profile: &TableProfile,
    theme: &Theme,
) {
    let header = Row::new(
        ["Column", "Data type", "Missing values"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let rows: Vec<Row> = profile
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let missing_style = if col.null_count > 0 {
                theme.warning
            } else {
                row_style(i, theme)
            };
            Row::new(vec![
                Cell::from(col.name.clone()),
                Cell::from(col.dtype.as_str()),
                Cell::from(formatting::format_count(col.null_count as u64)).style(missing_style),
            ])
            .style(row_style(i, theme))
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(15),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(title, theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the weekday recency/monetary/frequency table.  The row for
/// `highlight` (the busiest weekday) is emphasised.
pub fn render_rfm_table(
    frame: &mut Frame,
    area: Rect,
    aggregates: &[WeekdayAggregate],
    highlight: Option<Weekday>,
    theme: &Theme,
) {
    let header = Row::new(
        ["Weekday", "Recency (days)", "Monetary", "Frequency"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let rows: Vec<Row> = aggregates
        .iter()
        .enumerate()
        .map(|(i, agg)| {
            let style = if Some(agg.label) == highlight {
                theme.table_highlight
            } else {
                row_style(i, theme)
            };
            Row::new(vec![
                Cell::from(agg.label.label()),
                Cell::from(formatting::format_days(agg.recency)),
                Cell::from(formatting::format_count(agg.monetary)),
                Cell::from(formatting::format_count(u64::from(agg.frequency))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(crate::narrative::RFM_TITLE, theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when a file produced no rows.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No rows found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the --day-data and --hour-data paths, then press 'r' to reload.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(bordered(title, theme)),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use bikeshare_core::models::{ColumnProfile, ColumnType};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_profile() -> TableProfile {
        TableProfile {
            columns: vec![
                ColumnProfile {
                    name: "instant".to_string(),
                    dtype: ColumnType::Int64,
                    null_count: 0,
                },
                ColumnProfile {
                    name: "dteday".to_string(),
                    dtype: ColumnType::Date,
                    null_count: 0,
                },
                ColumnProfile {
                    name: "cnt".to_string(),
                    dtype: ColumnType::Int64,
                    null_count: 2,
                },
            ],
            head: vec![
                vec!["1".into(), "2011-01-01".into(), "985".into()],
                vec!["2".into(), "2011-01-02".into(), "801".into()],
            ],
            row_count: 731,
        }
    }

    fn make_aggregates() -> Vec<WeekdayAggregate> {
        Weekday::ALL
            .iter()
            .map(|&label| WeekdayAggregate {
                label,
                recency: if label == Weekday::Wednesday {
                    None
                } else {
                    Some(i64::from(label.code()))
                },
                monetary: u64::from(label.code()) * 100_000,
                frequency: 52,
            })
            .collect()
    }

    // ── fit_width ─────────────────────────────────────────────────────────────

    #[test]
    fn test_fit_width_short_text_unchanged() {
        assert_eq!(fit_width("cnt", 5), "cnt");
    }

    #[test]
    fn test_fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("workingday", 5), "work…");
        assert_eq!(fit_width("workingday", 0), "");
    }

    #[test]
    fn test_fit_width_counts_wide_chars() {
        // Each CJK character takes two cells.
        assert_eq!(fit_width("日本語", 5), "日本…");
    }

    // ── Render ───────────────────────────────────────────────────────────────

    #[test]
    fn test_render_head_table_shows_values() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let theme = Theme::dark();
        let profile = make_profile();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_head_table(frame, area, "Daily data", &profile, &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("2011-01-02"));
        assert!(text.contains("731 rows"));
    }

    #[test]
    fn test_render_head_table_empty_profile_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_head_table(frame, area, "Daily data", &TableProfile::default(), &theme);
            })
            .unwrap();

        assert!(buffer_text(terminal.backend().buffer()).contains("No rows found"));
    }

    #[test]
    fn test_render_schema_table_shows_types() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let theme = Theme::light();
        let profile = make_profile();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_schema_table(frame, area, "Daily columns", &profile, &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("datetime64[ns]"));
        assert!(text.contains("int64"));
    }

    #[test]
    fn test_render_rfm_table_shows_missing_recency() {
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        let theme = Theme::dark();
        let aggs = make_aggregates();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_rfm_table(frame, area, &aggs, Some(Weekday::Saturday), &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Saturday"));
        assert!(text.contains("600,000"));
        assert!(text.contains(formatting::MISSING));
    }
}
