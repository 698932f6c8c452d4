//! Mapping a [`Snapshot`] onto the regions of the board.
//!
//! The frame is pure data: text plus a semantic [`Tone`] per value. Colors,
//! borders and blinking are chosen by the renderer's theme, so nothing here
//! depends on the terminal library.

use crate::clock::AnimationPhase;
use crate::config::Settings;
use crate::data::duration::format_uptime;
use crate::data::Snapshot;
use crate::probe::{CloudInstance, ContainerState, InstanceStatus, LocalMetrics, ProbeResult};

/// Spinner glyphs for the twelve animation phases.
const SPINNER: [char; 12] = ['|', '/', '-', '\\', '|', '/', '-', '\\', '|', '/', '-', '\\'];

const TITLE: &str = "🚀 AI COMMAND CENTER";
const FOOTER: &str = " MISSION CONTROL ACTIVE | CTRL+C TO TERMINATE ";

/// How a value should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Healthy and worth drawing the eye to (blinking).
    Live,
    Healthy,
    /// Broken in a way someone should fix.
    Critical,
    /// Failed to check this tick; may recover on its own.
    Alert,
    /// Intentionally off or not yet known.
    Muted,
    /// Addresses and other identifiers.
    Accent,
}

/// A piece of text with its tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One labelled line of a status panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: &'static str,
    pub value: Cell,
}

/// A titled two-column table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPanel {
    pub title: &'static str,
    pub rows: Vec<Row>,
}

impl StatusPanel {
    /// Look up a row's value by label.
    pub fn value(&self, label: &str) -> Option<&Cell> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| &r.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    /// Tick time as `HH:MM:SS`.
    pub clock: String,
}

/// The decorative identity column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crest {
    pub spinner: char,
    pub node: String,
    pub version: String,
}

/// Named areas of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Header,
    Crest,
    Cloud,
    Local,
    Footer,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Header,
        Region::Crest,
        Region::Cloud,
        Region::Local,
        Region::Footer,
    ];
}

/// Everything drawn on one tick, derived from exactly one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub crest: Crest,
    pub cloud: StatusPanel,
    pub local: StatusPanel,
    pub footer: String,
}

impl Frame {
    /// Whether `region` holds something to draw.
    pub fn has_content(&self, region: Region) -> bool {
        match region {
            Region::Header => !self.header.title.is_empty() && !self.header.clock.is_empty(),
            Region::Crest => !self.crest.node.is_empty(),
            Region::Cloud => panel_filled(&self.cloud),
            Region::Local => panel_filled(&self.local),
            Region::Footer => !self.footer.is_empty(),
        }
    }

    pub fn is_complete(&self) -> bool {
        Region::ALL.iter().all(|r| self.has_content(*r))
    }
}

fn panel_filled(panel: &StatusPanel) -> bool {
    !panel.rows.is_empty() && panel.rows.iter().all(|r| !r.value.text.is_empty())
}

/// Builds frames from snapshots; holds only the fixed labels.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    region: String,
    node: String,
    version: String,
}

impl FrameBuilder {
    pub fn new(settings: &Settings) -> Self {
        Self {
            region: settings.instance_region.clone(),
            node: settings.node_label.clone(),
            version: settings.version_label.clone(),
        }
    }

    pub fn build(&self, snapshot: &Snapshot, phase: AnimationPhase) -> Frame {
        let (status, address) = cloud_cells(&snapshot.cloud);

        Frame {
            header: Header {
                title: TITLE.to_string(),
                clock: snapshot.taken_at.format("%H:%M:%S").to_string(),
            },
            crest: Crest {
                spinner: SPINNER[phase.index() % SPINNER.len()],
                node: self.node.clone(),
                version: self.version.clone(),
            },
            cloud: StatusPanel {
                title: "GOOGLE CLOUD",
                rows: vec![
                    row("Region", Cell::new(self.region.clone(), Tone::Plain)),
                    row("Status", status),
                    row("Public IP", address),
                ],
            },
            local: StatusPanel {
                title: "LOCAL BASE",
                rows: vec![
                    row("Uptime", uptime_cell(snapshot)),
                    row("Jenkins", container_cell(&snapshot.container)),
                    row("Network", network_cell(&snapshot.network)),
                    row("CPU/RAM", usage_cell(&snapshot.local)),
                    row("Temp", temperature_cell(&snapshot.local)),
                ],
            },
            footer: FOOTER.to_string(),
        }
    }
}

fn row(label: &'static str, value: Cell) -> Row {
    Row { label, value }
}

fn cloud_cells(cloud: &ProbeResult<CloudInstance>) -> (Cell, Cell) {
    match cloud {
        Ok(CloudInstance {
            status: InstanceStatus::Running,
            address,
        }) => (
            Cell::new("● ONLINE", Tone::Live),
            Cell::new(address.as_deref().unwrap_or("No IP"), Tone::Accent),
        ),
        Ok(CloudInstance {
            status: InstanceStatus::Stopped,
            ..
        }) => (
            Cell::new("● STOPPED", Tone::Muted),
            Cell::new("OFFLINE", Tone::Plain),
        ),
        Ok(CloudInstance {
            status: InstanceStatus::Other(status),
            ..
        }) => (
            Cell::new(format!("● {}", status), Tone::Muted),
            Cell::new("OFFLINE", Tone::Plain),
        ),
        Err(e) if e.is_tool_missing() => (
            Cell::new("● MISSING SDK", Tone::Critical),
            Cell::new("N/A", Tone::Muted),
        ),
        Err(_) => (
            Cell::new("CHECKING..", Tone::Alert),
            Cell::new("-", Tone::Muted),
        ),
    }
}

fn uptime_cell(snapshot: &Snapshot) -> Cell {
    match &snapshot.uptime {
        Ok(uptime) => Cell::new(format_uptime(*uptime), Tone::Plain),
        Err(_) => Cell::new("Unknown", Tone::Muted),
    }
}

fn container_cell(container: &ProbeResult<ContainerState>) -> Cell {
    match container {
        Ok(ContainerState::Running) => Cell::new("ACTIVE", Tone::Healthy),
        Ok(ContainerState::Offline) => Cell::new("OFFLINE", Tone::Critical),
        Err(_) => Cell::new("WAITING..", Tone::Muted),
    }
}

fn network_cell(network: &ProbeResult<Option<String>>) -> Cell {
    match network {
        Ok(Some(address)) => Cell::new(address.clone(), Tone::Plain),
        Ok(None) => Cell::new("No Network", Tone::Muted),
        Err(_) => Cell::new("-", Tone::Muted),
    }
}

fn usage_cell(local: &ProbeResult<LocalMetrics>) -> Cell {
    match local {
        Ok(m) => Cell::new(
            format!("{:.1}% / {:.1}%", m.cpu_percent, m.ram_percent),
            Tone::Plain,
        ),
        Err(_) => Cell::new("N/A", Tone::Muted),
    }
}

fn temperature_cell(local: &ProbeResult<LocalMetrics>) -> Cell {
    match local.as_ref().map(|m| &m.temperature) {
        Ok(Ok(temperature)) => Cell::new(temperature.clone(), Tone::Plain),
        _ => Cell::new("N/A", Tone::Muted),
    }
}
