//! One-shot JSON export of a snapshot.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use super::duration::format_uptime;
use super::Snapshot;
use crate::probe::{ContainerState, InstanceStatus, ProbeResult};

/// Build the export document for `snapshot`.
///
/// Each field is either `{"status": "ok", "value": ...}` or
/// `{"status": "unavailable", "reason": "..."}`.
pub fn snapshot_json(snapshot: &Snapshot) -> Value {
    json!({
        "taken_at": snapshot.taken_at.to_rfc3339(),
        "local": field(&snapshot.local, |m| json!({
            "cpu_percent": m.cpu_percent,
            "ram_percent": m.ram_percent,
            "temperature": field(&m.temperature, |t| json!(t)),
        })),
        "cloud": field(&snapshot.cloud, |c| json!({
            "state": match &c.status {
                InstanceStatus::Running => "RUNNING",
                InstanceStatus::Stopped => "STOPPED",
                InstanceStatus::Other(status) => status.as_str(),
            },
            "address": c.address,
        })),
        "container": field(&snapshot.container, |state| json!(match state {
            ContainerState::Running => "running",
            ContainerState::Offline => "offline",
        })),
        "network": field(&snapshot.network, |address| json!(address)),
        "uptime": field(&snapshot.uptime, |d| json!({
            "seconds": d.as_secs(),
            "display": format_uptime(*d),
        })),
    })
}

fn field<T>(result: &ProbeResult<T>, value: impl Fn(&T) -> Value) -> Value {
    match result {
        Ok(v) => json!({ "status": "ok", "value": value(v) }),
        Err(e) => json!({ "status": "unavailable", "reason": e.to_string() }),
    }
}

/// Write `snapshot` as pretty JSON to `path`.
pub fn export_to_file(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&snapshot_json(snapshot))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
