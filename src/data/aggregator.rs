//! Fan-out to every probe, fan-in to one [`Snapshot`].

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, warn};

use super::Snapshot;
use crate::config::Settings;
use crate::probe::{
    CloudInstance, CloudProbe, CommandRunner, ContainerProbe, ContainerState, LocalMetrics,
    LocalMetricsProbe, OverlayProbe, Probe, ProbeResult, SystemRunner, UptimeProbe,
};

/// Owns the fixed probe set and produces one snapshot per call.
#[derive(Debug)]
pub struct Aggregator {
    local: Box<dyn Probe<Output = LocalMetrics>>,
    cloud: Box<dyn Probe<Output = CloudInstance>>,
    container: Box<dyn Probe<Output = ContainerState>>,
    network: Box<dyn Probe<Output = Option<String>>>,
    uptime: Box<dyn Probe<Output = Duration>>,
}

impl Aggregator {
    pub fn new(
        local: Box<dyn Probe<Output = LocalMetrics>>,
        cloud: Box<dyn Probe<Output = CloudInstance>>,
        container: Box<dyn Probe<Output = ContainerState>>,
        network: Box<dyn Probe<Output = Option<String>>>,
        uptime: Box<dyn Probe<Output = Duration>>,
    ) -> Self {
        Self {
            local,
            cloud,
            container,
            network,
            uptime,
        }
    }

    /// The production probe set, spawning real processes.
    pub fn system(settings: &Settings) -> Self {
        Self::with_runner(settings, Arc::new(SystemRunner))
    }

    /// The production probe set over an arbitrary command runner.
    pub fn with_runner(settings: &Settings, runner: Arc<dyn CommandRunner>) -> Self {
        Self::new(
            Box::new(LocalMetricsProbe::new(runner.clone())),
            Box::new(CloudProbe::new(runner.clone(), &settings.instance_name)),
            Box::new(ContainerProbe::new(runner.clone(), &settings.container_name)),
            Box::new(OverlayProbe::new(runner, &settings.overlay_fallback)),
            Box::new(UptimeProbe::new()),
        )
    }

    /// Poll every probe once and wait for all of them.
    ///
    /// Probes run concurrently; each bounds its own latency, so this returns
    /// within the slowest probe's timeout.
    pub async fn collect(&self) -> Snapshot {
        let taken_at = Local::now();

        let (local, cloud, container, network, uptime) = tokio::join!(
            observe(self.local.as_ref()),
            observe(self.cloud.as_ref()),
            observe(self.container.as_ref()),
            observe(self.network.as_ref()),
            observe(self.uptime.as_ref()),
        );

        Snapshot {
            taken_at,
            local,
            cloud,
            container,
            network,
            uptime,
        }
    }
}

async fn observe<T: Debug + Send>(probe: &dyn Probe<Output = T>) -> ProbeResult<T> {
    let result = probe.poll().await;
    match &result {
        Ok(value) => debug!(probe = probe.name(), ?value, "probe ok"),
        Err(e) => warn!(probe = probe.name(), error = %e, "probe unavailable"),
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::probe::runner::{MockResponse, MockRunner};
    use crate::probe::{InstanceStatus, ProbeError};

    /// Probe that always answers with the same result.
    #[derive(Debug)]
    pub struct FixedProbe<T>(pub ProbeResult<T>);

    #[async_trait]
    impl<T> Probe for FixedProbe<T>
    where
        T: Clone + Debug + Send + Sync,
    {
        type Output = T;

        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn poll(&self) -> ProbeResult<T> {
            self.0.clone()
        }
    }

    pub fn healthy() -> Aggregator {
        Aggregator::new(
            Box::new(FixedProbe(Ok(LocalMetrics {
                cpu_percent: 12.5,
                ram_percent: 40.0,
                temperature: Ok("48.3°C".to_string()),
            }))),
            Box::new(FixedProbe(Ok(CloudInstance {
                status: InstanceStatus::Running,
                address: Some("34.1.2.3".to_string()),
            }))),
            Box::new(FixedProbe(Ok(ContainerState::Running))),
            Box::new(FixedProbe(Ok(Some("100.64.0.7".to_string())))),
            Box::new(FixedProbe(Ok(Duration::from_secs(3_725)))),
        )
    }

    pub fn broken() -> Aggregator {
        let missing = |tool: &str| ProbeError::ToolMissing(tool.to_string());
        Aggregator::new(
            Box::new(FixedProbe(Err(ProbeError::Task("sysinfo".into())))),
            Box::new(FixedProbe(Err(missing("gcloud")))),
            Box::new(FixedProbe(Err(missing("docker")))),
            Box::new(FixedProbe(Err(missing("tailscale")))),
            Box::new(FixedProbe(Err(ProbeError::Parse("boot time".into())))),
        )
    }

    #[tokio::test]
    async fn test_collect_all_ok() {
        let snapshot = healthy().collect().await;
        assert_eq!(snapshot.unavailable_count(), 0);
        assert_eq!(snapshot.container, Ok(ContainerState::Running));
    }

    #[tokio::test]
    async fn test_collect_all_unavailable() {
        let snapshot = broken().collect().await;
        assert_eq!(snapshot.unavailable_count(), 5);
        assert!(snapshot.cloud.unwrap_err().is_tool_missing());
    }

    #[tokio::test]
    async fn test_collect_mixed_outcomes() {
        let aggregator = Aggregator::new(
            Box::new(FixedProbe(Ok(LocalMetrics {
                cpu_percent: 1.0,
                ram_percent: 2.0,
                temperature: Err(ProbeError::ToolMissing("vcgencmd".into())),
            }))),
            Box::new(FixedProbe(Ok(CloudInstance {
                status: InstanceStatus::Stopped,
                address: None,
            }))),
            Box::new(FixedProbe(Err(ProbeError::Timeout(Duration::from_secs(1))))),
            Box::new(FixedProbe(Ok(None))),
            Box::new(FixedProbe(Ok(Duration::from_secs(5)))),
        );

        let snapshot = aggregator.collect().await;
        assert_eq!(snapshot.unavailable_count(), 1);
        assert!(snapshot.local.unwrap().temperature.is_err());
        assert_eq!(snapshot.network, Ok(None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_waits_for_hanging_tools_within_bound() {
        let runner = MockRunner::new()
            .installed("gcloud")
            .respond("gcloud", MockResponse::Hang)
            .respond("docker", MockResponse::Hang)
            .respond("tailscale", MockResponse::Hang);
        let settings = Settings::default();
        let aggregator = Aggregator::new(
            Box::new(FixedProbe(Ok(LocalMetrics {
                cpu_percent: 1.0,
                ram_percent: 2.0,
                temperature: Ok("40.0°C".into()),
            }))),
            Box::new(CloudProbe::new(Arc::new(runner), &settings.instance_name)),
            Box::new(ContainerProbe::new(
                Arc::new(MockRunner::new().respond("docker", MockResponse::Hang)),
                &settings.container_name,
            )),
            Box::new(OverlayProbe::new(
                Arc::new(MockRunner::new().respond("tailscale", MockResponse::Hang)),
                &settings.overlay_fallback,
            )),
            Box::new(FixedProbe(Ok(Duration::from_secs(5)))),
        );

        let started = tokio::time::Instant::now();
        let snapshot = aggregator.collect().await;

        assert!(started.elapsed() <= Duration::from_secs(2));
        assert!(matches!(snapshot.cloud, Err(ProbeError::Timeout(_))));
        assert!(matches!(snapshot.container, Err(ProbeError::Timeout(_))));
        assert!(matches!(snapshot.network, Err(ProbeError::Timeout(_))));
        assert_eq!(snapshot.unavailable_count(), 3);
    }

    #[tokio::test]
    async fn test_with_runner_wires_targets() {
        let runner = Arc::new(
            MockRunner::new()
                .installed("gcloud")
                .stdout("gcloud", "[]")
                .stdout("docker", "exited\n")
                .stdout("tailscale", ""),
        );
        let aggregator = Aggregator::with_runner(&Settings::default(), runner.clone());

        let snapshot = aggregator.collect().await;
        assert_eq!(
            snapshot.cloud,
            Ok(CloudInstance {
                status: InstanceStatus::Stopped,
                address: None
            })
        );
        assert_eq!(snapshot.container, Ok(ContainerState::Offline));
        assert_eq!(snapshot.network, Ok(None));

        let calls = runner.calls();
        assert!(calls.iter().any(|c| c.ends_with("jenkins")));
        assert!(calls.iter().any(|c| c == "/usr/sbin/tailscale ip -4"));
    }
}
