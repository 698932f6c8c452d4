//! Status panels: a bordered two-column table of label and value.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Cell, Row, Table},
    Frame,
};

use super::Theme;
use crate::frame::StatusPanel;

/// Render `panel` with its labels and border in `color`, rows centered
/// vertically and values flush right.
pub fn render(frame: &mut Frame, panel: &StatusPanel, color: Color, theme: &Theme, area: Rect) {
    let block = Block::bordered()
        .title(panel.title)
        .border_type(theme.border_type)
        .border_style(theme.panel_border(color));
    let inner = block.inner(area).inner(Margin::new(2, 0));
    frame.render_widget(block, area);

    let rows: Vec<Row> = panel
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.label).style(Style::default().fg(color)),
                Cell::from(
                    Line::styled(row.value.text.as_str(), theme.tone_style(row.value.tone))
                        .right_aligned(),
                ),
            ])
        })
        .collect();

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(panel.rows.len() as u16),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let table = Table::new(rows, [Constraint::Fill(1), Constraint::Fill(1)]).column_spacing(2);
    frame.render_widget(table, middle);
}
