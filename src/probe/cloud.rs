//! Cloud VM power state and public address via the `gcloud` CLI.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{bounded, CommandRunner, Probe, ProbeError, ProbeResult};

const CLOUD_TIMEOUT: Duration = Duration::from_secs(2);

/// Power state of the watched instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    Running,
    /// The instance list came back empty.
    Stopped,
    /// Any other lifecycle state reported by the API (e.g. `STAGING`).
    Other(String),
}

/// The watched instance as seen on this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudInstance {
    pub status: InstanceStatus,
    /// External NAT address; only looked up while running.
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InstanceRecord {
    status: String,
    #[serde(default, rename = "networkInterfaces")]
    network_interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Deserialize)]
struct NetworkInterface {
    #[serde(default, rename = "accessConfigs")]
    access_configs: Vec<AccessConfig>,
}

#[derive(Debug, Deserialize)]
struct AccessConfig {
    #[serde(rename = "natIP")]
    nat_ip: Option<String>,
}

/// Probe for one named compute instance.
#[derive(Debug)]
pub struct CloudProbe {
    runner: Arc<dyn CommandRunner>,
    instance: String,
}

impl CloudProbe {
    pub fn new(runner: Arc<dyn CommandRunner>, instance: impl Into<String>) -> Self {
        Self {
            runner,
            instance: instance.into(),
        }
    }
}

#[async_trait]
impl Probe for CloudProbe {
    type Output = CloudInstance;

    fn name(&self) -> &'static str {
        "cloud"
    }

    async fn poll(&self) -> ProbeResult<CloudInstance> {
        let Some(gcloud) = self.runner.which("gcloud") else {
            return Err(ProbeError::ToolMissing("gcloud".to_string()));
        };

        let filter = format!("--filter=name={}", self.instance);
        let output = bounded(
            CLOUD_TIMEOUT,
            self.runner.output(
                &gcloud,
                &["compute", "instances", "list", "--format=json", &filter],
            ),
        )
        .await?;

        if !output.success && output.stdout.trim().is_empty() {
            return Err(ProbeError::Command(output.stderr.trim().to_string()));
        }
        parse_instances(&output.stdout)
    }
}

/// Interpret the JSON array printed by `gcloud compute instances list`.
pub fn parse_instances(json: &str) -> ProbeResult<CloudInstance> {
    let records: Vec<InstanceRecord> = serde_json::from_str(json)?;

    let Some(record) = records.into_iter().next() else {
        return Ok(CloudInstance {
            status: InstanceStatus::Stopped,
            address: None,
        });
    };

    if record.status != "RUNNING" {
        return Ok(CloudInstance {
            status: InstanceStatus::Other(record.status),
            address: None,
        });
    }

    let address = record
        .network_interfaces
        .into_iter()
        .next()
        .and_then(|iface| iface.access_configs.into_iter().next())
        .and_then(|config| config.nat_ip);

    Ok(CloudInstance {
        status: InstanceStatus::Running,
        address,
    })
}
