//! Container run state via the container runtime CLI.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{bounded, CommandRunner, Probe, ProbeResult};

const CONTAINER_TIMEOUT: Duration = Duration::from_secs(1);

/// Run state of the watched container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    /// Anything other than `running`, including an unknown container.
    Offline,
}

impl ContainerState {
    /// Interpret the output of `docker inspect -f {{.State.Status}}`.
    pub fn from_inspect(stdout: &str) -> Self {
        if stdout.trim() == "running" {
            ContainerState::Running
        } else {
            ContainerState::Offline
        }
    }
}

/// Probe for one named container.
#[derive(Debug)]
pub struct ContainerProbe {
    runner: Arc<dyn CommandRunner>,
    container: String,
}

impl ContainerProbe {
    pub fn new(runner: Arc<dyn CommandRunner>, container: impl Into<String>) -> Self {
        Self {
            runner,
            container: container.into(),
        }
    }
}

#[async_trait]
impl Probe for ContainerProbe {
    type Output = ContainerState;

    fn name(&self) -> &'static str {
        "container"
    }

    async fn poll(&self) -> ProbeResult<ContainerState> {
        let output = bounded(
            CONTAINER_TIMEOUT,
            self.runner.output(
                "docker",
                &["inspect", "-f", "{{.State.Status}}", &self.container],
            ),
        )
        .await?;

        Ok(ContainerState::from_inspect(&output.stdout))
    }
}
