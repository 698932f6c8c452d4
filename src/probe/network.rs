//! Overlay network (VPN) address via the `tailscale` CLI.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{bounded, CommandRunner, Probe, ProbeResult};

const OVERLAY_TIMEOUT: Duration = Duration::from_secs(1);

/// Probe for this node's overlay IPv4 address.
///
/// Resolves to `Ok(None)` when the client answers but has no address.
#[derive(Debug)]
pub struct OverlayProbe {
    runner: Arc<dyn CommandRunner>,
    fallback: String,
}

impl OverlayProbe {
    /// `fallback` is used when `tailscale` is not on the search path.
    pub fn new(runner: Arc<dyn CommandRunner>, fallback: impl Into<String>) -> Self {
        Self {
            runner,
            fallback: fallback.into(),
        }
    }
}

#[async_trait]
impl Probe for OverlayProbe {
    type Output = Option<String>;

    fn name(&self) -> &'static str {
        "overlay"
    }

    async fn poll(&self) -> ProbeResult<Option<String>> {
        let program = self
            .runner
            .which("tailscale")
            .unwrap_or_else(|| self.fallback.clone());

        let output = bounded(
            OVERLAY_TIMEOUT,
            self.runner.output(&program, &["ip", "-4"]),
        )
        .await?;

        let address = output.stdout.trim();
        Ok((!address.is_empty()).then(|| address.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::runner::{MockResponse, MockRunner};
    use crate::probe::ProbeError;

    #[tokio::test]
    async fn test_uses_binary_on_path() {
        let runner = Arc::new(
            MockRunner::new()
                .installed("tailscale")
                .stdout("tailscale", "100.64.0.7\n"),
        );
        let probe = OverlayProbe::new(runner.clone(), "/usr/sbin/tailscale");

        assert_eq!(probe.poll().await, Ok(Some("100.64.0.7".to_string())));
        assert_eq!(runner.calls(), vec!["/usr/bin/tailscale ip -4".to_string()]);
    }

    #[tokio::test]
    async fn test_falls_back_to_fixed_path() {
        let runner = Arc::new(MockRunner::new().stdout("tailscale", "100.64.0.7\n"));
        let probe = OverlayProbe::new(runner.clone(), "/usr/sbin/tailscale");

        assert_eq!(probe.poll().await, Ok(Some("100.64.0.7".to_string())));
        assert_eq!(runner.calls(), vec!["/usr/sbin/tailscale ip -4".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_output_is_no_network() {
        let runner = MockRunner::new().stdout("tailscale", "\n");
        let probe = OverlayProbe::new(Arc::new(runner), "/usr/sbin/tailscale");

        assert_eq!(probe.poll().await, Ok(None));
    }

    #[tokio::test]
    async fn test_missing_client_is_an_error() {
        let probe = OverlayProbe::new(Arc::new(MockRunner::new()), "/usr/sbin/tailscale");
        assert!(probe.poll().await.unwrap_err().is_tool_missing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_client_is_bounded() {
        let runner = MockRunner::new().respond("tailscale", MockResponse::Hang);
        let probe = OverlayProbe::new(Arc::new(runner), "/usr/sbin/tailscale");

        assert_eq!(probe.poll().await, Err(ProbeError::Timeout(OVERLAY_TIMEOUT)));
    }
}
