//! Header and footer bands, plus the undersized-terminal notice.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use super::Theme;
use crate::frame::Header;

/// Title and clock, centered on a colored band.
pub fn render_header(frame: &mut Frame, header: &Header, theme: &Theme, area: Rect) {
    let line = Line::from(vec![
        Span::styled(header.title.as_str(), theme.title),
        Span::raw(" | "),
        Span::styled(header.clock.as_str(), theme.clock),
    ]);

    let block = Block::bordered()
        .border_type(BorderType::Plain)
        .style(theme.header);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

pub fn render_footer(frame: &mut Frame, footer: &str, theme: &Theme, area: Rect) {
    let paragraph = Paragraph::new(footer)
        .alignment(Alignment::Center)
        .style(theme.footer);
    frame.render_widget(paragraph, area);
}

/// Shown instead of the board when the panels would not fit.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width, area.height, min_width, min_height
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    let height = area.height.min(5);
    let centered = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(height) / 2,
        area.width,
        height,
    );
    frame.render_widget(paragraph, centered);
}
