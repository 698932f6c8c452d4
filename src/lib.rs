//! # mission-control
//!
//! A full-screen terminal status board for a small home-lab node and the
//! cloud instance it works with.
//!
//! Every five seconds, aligned to the wall clock, the board asks five
//! probes for the current state of the world and redraws:
//!
//! - local CPU, memory and SoC temperature
//! - a named cloud compute instance (`gcloud`)
//! - a named container (`docker`)
//! - the VPN overlay address (`tailscale`)
//! - system uptime
//!
//! A probe never fails the board. Missing tools, hung commands and garbage
//! output each become a short placeholder in that one field.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           app                                │
//! │  ┌─────────┐    ┌────────────┐    ┌─────────┐    ┌────────┐ │
//! │  │  probe  │───▶│    data    │───▶│  frame  │───▶│   ui   │ │
//! │  │ (query) │    │ (snapshot) │    │ (text)  │    │ (draw) │ │
//! │  └─────────┘    └────────────┘    └─────────┘    └────────┘ │
//! │       ▲                                                      │
//! │  clock (5 s boundaries)          events (q, Ctrl+C, resize)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`probe`]**: one [`Probe`] per external resource, each bounded in time
//! - **[`data`]**: the per-tick [`Snapshot`] and its JSON export
//! - **[`frame`]**: pure mapping from a snapshot to labelled text cells
//! - **[`ui`]**: ratatui layout, theme and terminal lifecycle
//! - **[`clock`]**: tick alignment and the crest animation phase
//! - **[`app`]**: the loop tying them together
//!
//! ## Usage
//!
//! ```bash
//! # Run the board
//! mission-control
//!
//! # Take one snapshot as JSON and exit
//! mission-control --export snapshot.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use mission_control::{Aggregator, FrameBuilder, Settings};
//! use mission_control::clock::AnimationPhase;
//!
//! # tokio_test::block_on(async {
//! let settings = Settings::default();
//! let snapshot = Aggregator::system(&settings).collect().await;
//! let frame = FrameBuilder::new(&settings).build(&snapshot, AnimationPhase::default());
//! println!("{}", frame.cloud.value("Status").map(|c| c.text.as_str()).unwrap_or("?"));
//! # });
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod data;
pub mod events;
pub mod frame;
pub mod probe;
pub mod ui;

pub use app::App;
pub use config::Settings;
pub use data::{Aggregator, Snapshot};
pub use frame::{Frame, FrameBuilder, Tone};
pub use probe::{Probe, ProbeError, ProbeResult};
pub use ui::{Renderer, TerminalRenderer, Theme};
