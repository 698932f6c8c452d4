//! The collect, render, sleep loop.

use anyhow::Result;
use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{info, trace};

use crate::clock::{sleep_until_next_tick, Tick};
use crate::data::{Aggregator, Snapshot};
use crate::events::ControlEvent;
use crate::frame::{Frame, FrameBuilder};
use crate::ui::Renderer;

/// Where the loop is within a tick.
#[derive(Debug)]
enum LoopState {
    /// At a tick boundary, nothing started yet.
    Idle(Tick),
    /// Waiting on every probe for this tick.
    Collecting(Tick),
    Rendering(Tick, Snapshot),
    /// Frame is on screen; waiting for the next boundary.
    Sleeping {
        tick: Tick,
        frame: Frame,
        wake_at: Instant,
    },
    Stopped,
}

/// Drives the board until a quit request arrives.
pub struct App<R: Renderer> {
    aggregator: Aggregator,
    builder: FrameBuilder,
    renderer: R,
    controls: mpsc::UnboundedReceiver<ControlEvent>,
}

impl<R: Renderer> App<R> {
    pub fn new(
        aggregator: Aggregator,
        builder: FrameBuilder,
        renderer: R,
        controls: mpsc::UnboundedReceiver<ControlEvent>,
    ) -> Self {
        Self {
            aggregator,
            builder,
            renderer,
            controls,
        }
    }

    /// Run ticks until told to quit. Only renderer failures are returned.
    pub async fn run(&mut self) -> Result<()> {
        info!("board started");
        let mut state = LoopState::Idle(Tick::first(Local::now()));

        loop {
            state = match state {
                LoopState::Idle(tick) => {
                    trace!(tick = tick.index, phase = tick.phase.index(), "tick");
                    LoopState::Collecting(tick)
                }
                LoopState::Collecting(tick) => {
                    trace!(tick = tick.index, "collecting");
                    self.collect(tick).await
                }
                LoopState::Rendering(tick, snapshot) => {
                    trace!(tick = tick.index, "rendering");
                    let frame = self.builder.build(&snapshot, tick.phase);
                    self.renderer.draw(&frame)?;
                    let wake_at = Instant::now() + sleep_until_next_tick(&Local::now());
                    LoopState::Sleeping {
                        tick,
                        frame,
                        wake_at,
                    }
                }
                LoopState::Sleeping {
                    tick,
                    frame,
                    wake_at,
                } => {
                    trace!(tick = tick.index, "sleeping");
                    tokio::select! {
                        _ = tokio::time::sleep_until(wake_at) => {
                            LoopState::Idle(tick.advance(Local::now()))
                        }
                        control = self.controls.recv() => match control {
                            Some(ControlEvent::Redraw) => {
                                self.renderer.draw(&frame)?;
                                LoopState::Sleeping { tick, frame, wake_at }
                            }
                            Some(ControlEvent::Quit) | None => LoopState::Stopped,
                        },
                    }
                }
                LoopState::Stopped => break,
            };
        }

        info!("board stopped");
        Ok(())
    }

    /// Collect one snapshot, giving up early only on a quit request.
    async fn collect(&mut self, tick: Tick) -> LoopState {
        let collect = self.aggregator.collect();
        tokio::pin!(collect);

        loop {
            tokio::select! {
                snapshot = &mut collect => return LoopState::Rendering(tick, snapshot),
                control = self.controls.recv() => match control {
                    // Nothing on screen is stale yet; the frame about to be
                    // drawn covers the new size.
                    Some(ControlEvent::Redraw) => {}
                    Some(ControlEvent::Quit) | None => return LoopState::Stopped,
                },
            }
        }
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
