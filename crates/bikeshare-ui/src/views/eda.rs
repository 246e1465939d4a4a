//! Exploratory analysis tab: `cnt` distribution, correlation heatmap and the
//! hourly rental profile.

use ratatui::{layout::Rect, Frame};

use bikeshare_core::formatting::{format_number, MISSING};
use bikeshare_core::stats::Summary;
use bikeshare_data::analysis::DashboardData;

use super::with_caption;
use crate::components::{charts, heatmap};
use crate::narrative;
use crate::themes::Theme;

pub const SECTIONS: [&str; 3] = ["Rental distribution", "Correlation heatmap", "Hourly pattern"];

/// One-line `cnt` summary: count, mean, std, min, quartiles, max.
pub fn summary_text(summary: Option<&Summary>) -> String {
    match summary {
        Some(s) => format!(
            "n = {}  mean = {}  std = {}  min = {}  25% = {}  50% = {}  75% = {}  max = {}",
            s.count,
            format_number(s.mean, 1),
            s.std
                .map(|v| format_number(v, 1))
                .unwrap_or_else(|| MISSING.to_string()),
            format_number(s.min, 0),
            format_number(s.q1, 0),
            format_number(s.median, 0),
            format_number(s.q3, 0),
            format_number(s.max, 0),
        ),
        None => format!("n = 0  ({} rows loaded)", MISSING),
    }
}

/// Caption under the hourly chart, naming the busiest hour when known.
pub fn hourly_caption(data: &DashboardData) -> String {
    match data.peak_hour() {
        Some(h) => format!("{} Busiest hour overall: {:02}:00.", narrative::HOURLY_CAPTION, h),
        None => narrative::HOURLY_CAPTION.to_string(),
    }
}

/// Draw `section` of the exploratory analysis tab.
pub fn render(frame: &mut Frame, area: Rect, data: &DashboardData, section: usize, theme: &Theme) {
    match section {
        0 => {
            let caption = format!(
                "{}\n{}",
                summary_text(data.distribution.summary.as_ref()),
                narrative::DISTRIBUTION_CAPTION
            );
            let body = with_caption(frame, area, &caption, theme);
            charts::render_histogram(
                frame,
                body,
                narrative::DISTRIBUTION_TITLE,
                &data.distribution,
                theme,
            );
        }
        1 => {
            let body = with_caption(frame, area, narrative::HEATMAP_CAPTION, theme);
            heatmap::render_heatmap(frame, body, narrative::HEATMAP_TITLE, &data.correlation, theme);
        }
        _ => {
            let caption = hourly_caption(data);
            let body = with_caption(frame, area, &caption, theme);
            charts::render_hourly_profile(frame, body, narrative::HOURLY_TITLE, &data.hourly, theme);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, empty_dashboard, sample_dashboard};
    use bikeshare_core::stats::describe;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(data: &DashboardData, section: usize) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, data, section, &theme);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_summary_text() {
        let summary = describe(&[1000.0, 2000.0, 3000.0]).unwrap();
        let text = summary_text(Some(&summary));
        assert!(text.starts_with("n = 3  mean = 2,000.0  std = 1,000.0"), "got: {text}");
        assert!(text.ends_with("max = 3,000"));
        assert!(summary_text(None).contains(MISSING));
    }

    #[test]
    fn test_hourly_caption_names_peak() {
        assert!(hourly_caption(&sample_dashboard()).ends_with("Busiest hour overall: 23:00."));
        assert_eq!(hourly_caption(&empty_dashboard()), narrative::HOURLY_CAPTION);
    }

    #[test]
    fn test_render_distribution_section() {
        let text = draw(&sample_dashboard(), 0);
        assert!(text.contains("n = 28"));
    }

    #[test]
    fn test_render_heatmap_section() {
        let text = draw(&sample_dashboard(), 1);
        assert!(text.contains("Correlation heatmap"));
        assert!(text.contains("1.00"));
    }

    #[test]
    fn test_render_hourly_section() {
        let text = draw(&sample_dashboard(), 2);
        assert!(text.contains("23:00"));
    }

    #[test]
    fn test_render_empty_dashboard_every_section() {
        let data = empty_dashboard();
        for section in 0..SECTIONS.len() {
            draw(&data, section);
        }
    }
}
