//! Drawing frames to a real (or test) terminal.

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::debug;

use super::{render, Renderer, Theme};
use crate::frame::Frame;

/// A [`Renderer`] over any ratatui backend.
pub struct TuiRenderer<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
}

impl<B: Backend> TuiRenderer<B> {
    pub fn new(backend: B, theme: Theme) -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            theme,
        })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Renderer for TuiRenderer<B> {
    fn draw(&mut self, board: &Frame) -> Result<()> {
        let theme = &self.theme;
        self.terminal.draw(|f| render(f, board, theme))?;
        Ok(())
    }
}

/// The full-screen renderer on stdout.
pub type TerminalRenderer = TuiRenderer<CrosstermBackend<Stdout>>;

impl TerminalRenderer {
    /// Switch stdout to raw mode on the alternate screen.
    ///
    /// Installs a panic hook that puts the terminal back before the panic
    /// message is printed.
    pub fn enter(theme: Theme) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
            original_hook(panic);
        }));

        debug!("entered alternate screen");
        Self::new(CrosstermBackend::new(stdout), theme)
    }

    /// Leave the alternate screen and give the terminal back.
    pub fn restore(mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        debug!("terminal restored");
        Ok(())
    }
}
