//! Keyboard, resize and signal input.
//!
//! Raw mode swallows the terminal's own Ctrl+C handling, so the key is
//! mapped here alongside the real SIGINT.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// What the loop should do in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Restore the terminal and exit.
    Quit,
    /// Draw the current frame again (terminal was resized).
    Redraw,
}

/// Map a terminal event to a control event, if it is one.
pub fn control_for_event(event: &Event) -> Option<ControlEvent> {
    match event {
        Event::Key(key) => control_for_key(key),
        Event::Resize(_, _) => Some(ControlEvent::Redraw),
        _ => None,
    }
}

fn control_for_key(key: &KeyEvent) -> Option<ControlEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(ControlEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ControlEvent::Quit)
        }
        _ => None,
    }
}

/// Start the terminal-event and SIGINT listeners.
///
/// The channel never closes on its own: the signal task keeps a sender alive
/// for the life of the runtime.
pub fn spawn_listeners() -> mpsc::UnboundedReceiver<ControlEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    let keys = tx.clone();
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => {
                    if let Some(control) = control_for_event(&event) {
                        debug!(?control, "terminal input");
                        if keys.send(control).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    warn!("terminal event stream failed: {}", e);
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        loop {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    debug!("interrupt received");
                    if tx.send(ControlEvent::Quit).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("cannot listen for interrupts: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        }
    });

    rx
}
