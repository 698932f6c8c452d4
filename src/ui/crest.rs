//! The crest column: a star, a cylindrical shield with the spinner in its
//! core, and the node and version labels.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::Theme;
use crate::frame::Crest;

const TITLE: &str = "COMMANDER";

/// Outline rows above and below the core. Every row is the same width so the
/// spinner never shifts the shield.
const SHIELD_TOP: [&str; 3] = ["   .-----.   ", r"  /       \  ", " |         | "];
const SHIELD_BOTTOM: [&str; 3] = [" |         | ", r"  \       /  ", "   '-----'   "];

/// Lines of crest art for `crest`.
pub fn crest_lines<'a>(crest: &Crest, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::styled("      ★      ", theme.glyph(theme.star)),
        Line::styled("   COMMAND   ", theme.outline),
        Line::raw(""),
    ];
    lines.extend(
        SHIELD_TOP
            .iter()
            .map(|row| Line::styled(*row, theme.outline)),
    );
    lines.push(Line::from(vec![
        Span::styled(" |    ", theme.outline),
        Span::styled(crest.spinner.to_string(), theme.glyph(theme.crest)),
        Span::styled("    | ", theme.outline),
    ]));
    lines.extend(
        SHIELD_BOTTOM
            .iter()
            .map(|row| Line::styled(*row, theme.outline)),
    );
    lines.push(Line::raw(""));
    lines.push(Line::styled(format!("  NODE: {}  ", crest.node), theme.node));
    lines.push(Line::styled(format!("  VER: {}   ", crest.version), theme.version));
    lines
}

pub fn render(frame: &mut Frame, crest: &Crest, theme: &Theme, area: Rect) {
    let block = Block::bordered()
        .title(TITLE)
        .border_type(theme.border_type)
        .border_style(theme.panel_border(theme.crest));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = crest_lines(crest, theme);
    let height = lines.len() as u16;
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), middle);
}
