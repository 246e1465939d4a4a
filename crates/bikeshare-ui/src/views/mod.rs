//! One module per dashboard tab.  Each exposes a `render` function that draws
//! the selected section of that tab into the content area.

pub mod conclusions;
pub mod eda;
pub mod overview;
pub mod rfm;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Tallest a caption strip may grow.
const MAX_CAPTION_LINES: u16 = 4;

/// Lines needed to show `text` wrapped at `width`, capped.
pub(crate) fn caption_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let lines: usize = text
        .lines()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    (lines.max(1) as u16).min(MAX_CAPTION_LINES)
}

/// Draw `caption` in a strip at the bottom of `area` and return what is left
/// above it.
pub(crate) fn with_caption(frame: &mut Frame, area: Rect, caption: &str, theme: &Theme) -> Rect {
    let height = caption_height(caption, area.width);
    let [body, strip] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(height)]).areas(area);
    frame.render_widget(
        Paragraph::new(caption)
            .style(theme.caption)
            .wrap(Wrap { trim: true }),
        strip,
    );
    body
}

/// `label: value` line used by the metric listings.
pub(crate) fn metric_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<22}", format!("{}:", label)), theme.label),
        Span::styled(value, theme.value),
    ])
}
