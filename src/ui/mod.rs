//! Terminal rendering using ratatui.
//!
//! A [`Frame`] is pure data; this module lays it out and styles it. Each
//! region has its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`common`]: header band, footer band, undersized-terminal notice
//! - [`crest`]: the animated crest column
//! - [`panels`]: the cloud and local status tables
//! - [`terminal`]: the crossterm-backed [`Renderer`] and terminal lifecycle
//! - [`theme`]: light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Header (3 rows)                          │
//! ├─────────────┬────────────────────────────┤
//! │             │ Cloud panel                │
//! │ Crest       ├────────────────────────────┤
//! │ (1/3)       │ Local panel                │
//! ├─────────────┴────────────────────────────┤
//! │ Footer (1 row)                           │
//! └──────────────────────────────────────────┘
//! ```

pub mod common;
pub mod crest;
pub mod panels;
pub mod terminal;
pub mod theme;

use anyhow::Result;
use ratatui::layout::{Constraint, Layout};

pub use terminal::{TerminalRenderer, TuiRenderer};
pub use theme::Theme;

use crate::frame::Frame;

/// Smallest area the board is drawn in.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 18;

/// Sink for finished frames.
pub trait Renderer {
    /// Replace whatever is on screen with `board`.
    fn draw(&mut self, board: &Frame) -> Result<()>;
}

/// Lay out and draw `board` into a ratatui frame.
pub fn render(f: &mut ratatui::Frame, board: &Frame, theme: &Theme) {
    let area = f.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        common::render_too_small(f, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).areas(body);
    let [cloud, local] =
        Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).areas(right);

    common::render_header(f, &board.header, theme, header);
    crest::render(f, &board.crest, theme, left);
    panels::render(f, &board.cloud, theme.cloud, theme, cloud);
    panels::render(f, &board.local, theme.local, theme, local);
    common::render_footer(f, &board.footer, theme, footer);
}
