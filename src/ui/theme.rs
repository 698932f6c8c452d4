//! Color theme for the board.
//!
//! Supports light and dark themes with automatic terminal detection. This is
//! the only place where a [`Tone`] becomes a color.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::frame::Tone;

/// Colors and styles for every part of the board.
///
/// Use [`Theme::auto_detect()`] to pick based on the terminal background,
/// or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background band behind the title and clock.
    pub header: Style,
    /// Title text in the header.
    pub title: Style,
    /// Clock text in the header.
    pub clock: Style,
    pub footer: Style,
    /// Border color of the crest panel.
    pub crest: Color,
    /// Border and label color of the cloud panel.
    pub cloud: Color,
    /// Border and label color of the local panel.
    pub local: Color,
    /// Star above the crest.
    pub star: Color,
    /// Crest outline and caption.
    pub outline: Style,
    /// Node label under the crest.
    pub node: Style,
    /// Version label under the crest.
    pub version: Style,
    pub healthy: Color,
    pub critical: Color,
    pub alert: Color,
    pub accent: Color,
    pub border_type: BorderType,
}

impl Theme {
    /// Theme for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            header: Style::default().bg(Color::Blue),
            title: bold(Color::White),
            clock: bold(Color::Yellow),
            footer: Style::default().fg(Color::Black).bg(Color::White),
            crest: Color::Green,
            cloud: Color::Cyan,
            local: Color::Magenta,
            star: Color::Yellow,
            outline: bold(Color::White),
            node: bold(Color::Cyan),
            version: Style::new().fg(Color::White).add_modifier(Modifier::DIM),
            healthy: Color::Green,
            critical: Color::Red,
            alert: Color::Yellow,
            accent: Color::Cyan,
            border_type: BorderType::Thick,
        }
    }

    /// Theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            header: Style::default().bg(Color::Blue),
            title: bold(Color::White),
            clock: bold(Color::LightYellow),
            footer: Style::default().fg(Color::White).bg(Color::Black),
            crest: Color::Green,
            cloud: Color::Blue,
            local: Color::Magenta,
            star: Color::Rgb(0xb8, 0x86, 0x0b),
            outline: bold(Color::Black),
            node: bold(Color::Blue),
            version: Style::default().fg(Color::DarkGray),
            healthy: Color::Green,
            critical: Color::Red,
            alert: Color::Rgb(0xb8, 0x86, 0x0b),
            accent: Color::Blue,
            border_type: BorderType::Thick,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a value cell.
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Plain => Style::default(),
            Tone::Live => bold(self.healthy).add_modifier(Modifier::SLOW_BLINK),
            Tone::Healthy => bold(self.healthy),
            Tone::Critical => bold(self.critical),
            Tone::Alert => Style::default().fg(self.alert),
            Tone::Muted => Style::default().add_modifier(Modifier::DIM),
            Tone::Accent => Style::default().fg(self.accent),
        }
    }

    /// Border style for a panel drawn in `color`.
    pub fn panel_border(&self, color: Color) -> Style {
        bold(color)
    }

    /// Style for a single decorative glyph, such as the crest star.
    pub fn glyph(&self, color: Color) -> Style {
        bold(color)
    }
}

fn bold(color: Color) -> Style {
    Style::new().fg(color).add_modifier(Modifier::BOLD)
}
