//! Time since boot.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use sysinfo::System;

use super::{bounded_blocking, Probe, ProbeError, ProbeResult};

const UPTIME_TIMEOUT: Duration = Duration::from_secs(1);

/// Probe for elapsed time since the OS booted, truncated to whole seconds.
#[derive(Debug, Clone, Copy)]
pub struct UptimeProbe {
    boot_time: fn() -> u64,
}

impl UptimeProbe {
    pub fn new() -> Self {
        Self {
            boot_time: System::boot_time,
        }
    }

    /// Use `boot_time` (seconds since the epoch, 0 when unknown) instead of
    /// asking the OS.
    pub fn with_boot_time(boot_time: fn() -> u64) -> Self {
        Self { boot_time }
    }
}

impl Default for UptimeProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for UptimeProbe {
    type Output = Duration;

    fn name(&self) -> &'static str {
        "uptime"
    }

    async fn poll(&self) -> ProbeResult<Duration> {
        let boot_time = self.boot_time;
        bounded_blocking(UPTIME_TIMEOUT, move || uptime_since(boot_time())).await
    }
}

fn uptime_since(boot: u64) -> ProbeResult<Duration> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ProbeError::Parse(e.to_string()))?
        .as_secs();

    if boot == 0 || boot > now {
        return Err(ProbeError::Parse(format!("implausible boot time {}", boot)));
    }
    Ok(Duration::from_secs(now - boot))
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn an_hour_ago() -> u64 {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        now.as_secs() - 3600
    }

    #[tokio::test]
    async fn test_uptime_from_boot_time() {
        let probe = UptimeProbe::with_boot_time(an_hour_ago);
        let uptime = probe.poll().await.unwrap();
        assert!(uptime >= Duration::from_secs(3600));
        assert!(uptime < Duration::from_secs(3610));
        assert_eq!(uptime.subsec_nanos(), 0);
    }

    #[tokio::test]
    async fn test_unknown_boot_time() {
        let result = UptimeProbe::with_boot_time(|| 0).poll().await;
        assert!(matches!(result, Err(ProbeError::Parse(_))));
    }

    #[tokio::test]
    async fn test_future_boot_time() {
        let result = UptimeProbe::with_boot_time(|| u64::MAX).poll().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_hanging_boot_time_read_is_bounded() {
        let probe = UptimeProbe::with_boot_time(|| {
            std::thread::sleep(Duration::from_secs(3));
            1
        });

        let started = Instant::now();
        let result = probe.poll().await;
        assert_eq!(result, Err(ProbeError::Timeout(UPTIME_TIMEOUT)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_real_host_has_uptime() {
        assert!(UptimeProbe::new().poll().await.is_ok());
    }
}
