//! Probes: one per monitored resource.
//!
//! Each probe queries a single external source (a CLI, the kernel) and
//! returns a normalized [`ProbeResult`]. Probes bound their own latency and
//! absorb every failure, so a broken tool degrades one field of the board
//! instead of the whole tick.
//!
//! ```text
//!  LocalMetricsProbe ──▶ sysinfo + vcgencmd
//!  CloudProbe        ──▶ gcloud compute instances list
//!  ContainerProbe    ──▶ docker inspect
//!  OverlayProbe      ──▶ tailscale ip -4
//!  UptimeProbe       ──▶ sysinfo boot time
//! ```

mod cloud;
mod container;
mod error;
mod local;
mod network;
pub mod runner;
mod uptime;

pub use cloud::{CloudInstance, CloudProbe, InstanceStatus};
pub use container::{ContainerProbe, ContainerState};
pub use error::ProbeError;
pub use local::{LocalMetrics, LocalMetricsProbe, UsageSampler};
pub use network::OverlayProbe;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use uptime::UptimeProbe;

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

/// Outcome of one probe poll: a value, or the reason it is unavailable.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// A single monitored resource.
///
/// `poll` must return within the probe's own bound and must never panic
/// or propagate a failure other than as `Err(ProbeError)`.
#[async_trait]
pub trait Probe: Send + Sync + Debug {
    type Output: Send;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Query the resource once.
    async fn poll(&self) -> ProbeResult<Self::Output>;
}

/// Await `fut`, giving up with [`ProbeError::Timeout`] after `limit`.
pub async fn bounded<T, F>(limit: Duration, fut: F) -> ProbeResult<T>
where
    F: Future<Output = ProbeResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout(limit)),
    }
}

/// Run blocking work on the blocking pool, bounded by `limit`.
///
/// A panic inside `work` becomes [`ProbeError::Task`]. A timeout does not
/// stop `work`: its blocking-pool thread keeps running until `work` returns.
pub async fn bounded_blocking<T, F>(limit: Duration, work: F) -> ProbeResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ProbeResult<T> + Send + 'static,
{
    bounded(limit, async move {
        tokio::task::spawn_blocking(work)
            .await
            .map_err(|e| ProbeError::Task(e.to_string()))?
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_bounded_passes_through() {
        let result = bounded(Duration::from_secs(1), async { Ok::<_, ProbeError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_times_out() {
        let limit = Duration::from_secs(2);
        let result: ProbeResult<()> = bounded(limit, std::future::pending()).await;
        assert_eq!(result, Err(ProbeError::Timeout(limit)));
    }

    #[tokio::test]
    async fn test_bounded_blocking_catches_panic() {
        let result: ProbeResult<()> =
            bounded_blocking(Duration::from_secs(1), || panic!("sensor exploded")).await;
        assert!(matches!(result, Err(ProbeError::Task(_))));
    }
}
