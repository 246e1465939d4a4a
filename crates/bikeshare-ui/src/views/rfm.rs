//! Aggregate analysis tab: weekday RFM table and total rentals per weekday.

use ratatui::{layout::Rect, Frame};

use bikeshare_data::analysis::DashboardData;

use super::with_caption;
use crate::components::charts;
use crate::narrative;
use crate::table_view::render_rfm_table;
use crate::themes::Theme;

pub const SECTIONS: [&str; 2] = ["RFM metrics", "Rentals by weekday"];

pub fn render(frame: &mut Frame, area: Rect, data: &DashboardData, section: usize, theme: &Theme) {
    match section {
        0 => {
            let body = with_caption(frame, area, narrative::RFM_CAPTION, theme);
            render_rfm_table(frame, body, &data.weekday, data.busiest_weekday(), theme);
        }
        _ => {
            let caption =
                narrative::weekday_bar_caption(data.busiest_weekday(), data.quietest_weekday());
            let body = with_caption(frame, area, &caption, theme);
            charts::render_weekday_bars(
                frame,
                body,
                narrative::WEEKDAY_BAR_TITLE,
                &data.weekday_totals,
                theme.chart_bar,
                theme,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, empty_dashboard, sample_dashboard};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(data: &DashboardData, section: usize) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        let theme = Theme::light();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, data, section, &theme);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_render_rfm_section_lists_every_weekday() {
        let text = draw(&sample_dashboard(), 0);
        for day in bikeshare_core::models::Weekday::ALL {
            assert!(text.contains(day.label()), "missing {day}");
        }
        assert!(text.contains("19,000"));
    }

    #[test]
    fn test_render_bar_section_caption() {
        let text = draw(&sample_dashboard(), 1);
        assert!(text.contains("Saturday has the highest total rentals and Sunday the lowest."));
    }

    #[test]
    fn test_render_empty_dashboard() {
        let data = empty_dashboard();
        assert!(draw(&data, 0).contains("n/a"));
        assert!(draw(&data, 1).contains("No rentals recorded."));
    }
}
