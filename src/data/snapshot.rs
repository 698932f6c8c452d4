//! The per-tick snapshot of every monitored resource.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::probe::{CloudInstance, ContainerState, LocalMetrics, ProbeResult};

/// Results of all five probes for one tick.
///
/// Built only once every probe has returned, consumed by the frame builder
/// and then dropped. Every field is always present; an unavailable resource
/// is an `Err` value, never a missing one.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Wall-clock time at which collection started.
    pub taken_at: DateTime<Local>,
    pub local: ProbeResult<LocalMetrics>,
    pub cloud: ProbeResult<CloudInstance>,
    pub container: ProbeResult<ContainerState>,
    /// Overlay address, `Ok(None)` when the client has none.
    pub network: ProbeResult<Option<String>>,
    pub uptime: ProbeResult<Duration>,
}

impl Snapshot {
    /// Number of fields whose probe came back unavailable.
    pub fn unavailable_count(&self) -> usize {
        [
            self.local.is_err(),
            self.cloud.is_err(),
            self.container.is_err(),
            self.network.is_err(),
            self.uptime.is_err(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }
}
