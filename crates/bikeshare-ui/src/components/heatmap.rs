use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use bikeshare_core::formatting::format_coefficient;
use bikeshare_core::stats::CorrelationMatrix;

use crate::table_view::{fit_width, render_no_data};
use crate::themes::Theme;

/// Width of the row-name column.
const NAME_WIDTH: u16 = 10;
/// Width of each coefficient cell; fits `-1.00`.
const CELL_WIDTH: u16 = 5;

/// Annotated correlation heatmap: one coloured cell per column pair.
pub fn render_heatmap(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    matrix: &CorrelationMatrix,
    theme: &Theme,
) {
    if matrix.size() == 0 {
        render_no_data(frame, area, title, theme);
        return;
    }

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(
                matrix
                    .columns
                    .iter()
                    .map(|c| Cell::from(fit_width(c, CELL_WIDTH as usize))),
            )
            .collect::<Vec<_>>(),
    )
    .style(theme.table_header);

    let rows: Vec<Row> = matrix
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut cells = vec![
                Cell::from(fit_width(name, NAME_WIDTH as usize)).style(theme.table_header),
            ];
            cells.extend((0..matrix.size()).map(|j| {
                let r = matrix.get(i, j);
                Cell::from(format_coefficient(r)).style(theme.heatmap_style(r))
            }));
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(NAME_WIDTH))
        .chain(std::iter::repeat_n(Constraint::Length(CELL_WIDTH), matrix.size()))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, empty_dashboard, sample_dashboard};
    use bikeshare_core::stats::correlation_matrix;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(matrix: &CorrelationMatrix, theme: &Theme) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_heatmap(frame, area, "Heatmap", matrix, theme);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_heatmap_diagonal_is_one() {
        let data = sample_dashboard();
        let text = draw(&data.correlation, &Theme::dark());
        assert!(text.contains("1.00"));
        assert!(text.contains("instant"));
    }

    #[test]
    fn test_heatmap_constant_column_shows_missing() {
        let matrix = correlation_matrix(&[
            ("cnt", vec![1.0, 2.0, 3.0]),
            ("holiday", vec![0.0, 0.0, 0.0]),
        ]);
        let text = draw(&matrix, &Theme::classic());
        assert!(text.contains("n/a"));
        assert!(text.contains("1.00"));
    }

    #[test]
    fn test_heatmap_header_truncates_long_names() {
        let matrix = correlation_matrix(&[
            ("workingday", vec![0.0, 1.0, 1.0]),
            ("registered", vec![5.0, 9.0, 12.0]),
        ]);
        let text = draw(&matrix, &Theme::light());
        assert!(text.contains("work…"));
        assert!(text.contains("regi…"));
    }

    #[test]
    fn test_heatmap_empty_columns_does_not_panic() {
        let data = empty_dashboard();
        draw(&data.correlation, &Theme::dark());
        draw(&correlation_matrix(&[]), &Theme::dark());
    }
}
