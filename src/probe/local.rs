//! Local host metrics: CPU, RAM and board temperature.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sysinfo::System;

use super::{bounded, bounded_blocking, CommandRunner, Probe, ProbeError, ProbeResult};

/// Bound on the CPU/RAM sample, which itself waits between two readings.
const SAMPLE_TIMEOUT: Duration = Duration::from_secs(1);
/// Bound on the temperature query.
const TEMPERATURE_TIMEOUT: Duration = Duration::from_secs(1);

/// CPU and memory utilization plus the board temperature.
///
/// The temperature comes from a separate command and can fail on its own
/// without invalidating the utilization figures.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMetrics {
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub temperature: ProbeResult<String>,
}

/// CPU and RAM percentages, read synchronously.
pub type UsageSampler = fn() -> ProbeResult<(f32, f32)>;

/// Probe for local host metrics.
#[derive(Debug)]
pub struct LocalMetricsProbe {
    runner: Arc<dyn CommandRunner>,
    sampler: UsageSampler,
}

impl LocalMetricsProbe {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_sampler(runner, sample_usage)
    }

    /// Read CPU and RAM through `sampler` instead of sysinfo.
    pub fn with_sampler(runner: Arc<dyn CommandRunner>, sampler: UsageSampler) -> Self {
        Self { runner, sampler }
    }

    async fn temperature(&self) -> ProbeResult<String> {
        let output = bounded(
            TEMPERATURE_TIMEOUT,
            self.runner.output("vcgencmd", &["measure_temp"]),
        )
        .await?;

        if !output.success {
            return Err(ProbeError::Command(output.stderr.trim().to_string()));
        }
        parse_temperature(&output.stdout)
    }
}

#[async_trait]
impl Probe for LocalMetricsProbe {
    type Output = LocalMetrics;

    fn name(&self) -> &'static str {
        "local"
    }

    async fn poll(&self) -> ProbeResult<LocalMetrics> {
        let (usage, temperature) = tokio::join!(
            bounded_blocking(SAMPLE_TIMEOUT, self.sampler),
            self.temperature()
        );
        let (cpu_percent, ram_percent) = usage?;

        Ok(LocalMetrics {
            cpu_percent,
            ram_percent,
            temperature,
        })
    }
}

/// Take two CPU readings one minimum interval apart, then read memory.
fn sample_usage() -> ProbeResult<(f32, f32)> {
    let mut sys = System::new();
    sys.refresh_cpu_usage();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let total = sys.total_memory();
    if total == 0 {
        return Err(ProbeError::Parse("no memory information".to_string()));
    }
    let used = total.saturating_sub(sys.available_memory());
    let ram_percent = (used as f64 / total as f64 * 100.0) as f32;

    Ok((sys.global_cpu_usage(), ram_percent))
}

/// Turn `temp=48.3'C` into `48.3°C`.
pub fn parse_temperature(raw: &str) -> ProbeResult<String> {
    let value = raw.trim().trim_start_matches("temp=").replace('\'', "°");
    if value.is_empty() {
        return Err(ProbeError::Parse("empty temperature reading".to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::probe::runner::{MockResponse, MockRunner};

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature("temp=48.3'C\n").unwrap(), "48.3°C");
        assert_eq!(parse_temperature("51.0'C").unwrap(), "51.0°C");
        assert!(parse_temperature("  \n").is_err());
    }

    #[tokio::test]
    async fn test_reads_temperature() {
        let runner = MockRunner::new().stdout("vcgencmd", "temp=44.0'C\n");
        let probe = LocalMetricsProbe::new(Arc::new(runner));

        let metrics = probe.poll().await.unwrap();
        assert_eq!(metrics.temperature, Ok("44.0°C".to_string()));
        assert!((0.0..=100.0).contains(&metrics.ram_percent));
    }

    #[tokio::test]
    async fn test_missing_sensor_keeps_usage() {
        let probe = LocalMetricsProbe::new(Arc::new(MockRunner::new()));

        let metrics = probe.poll().await.unwrap();
        assert!(metrics.temperature.unwrap_err().is_tool_missing());
        assert!(metrics.cpu_percent >= 0.0);
        assert!(metrics.ram_percent > 0.0);
    }

    #[tokio::test]
    async fn test_hanging_sensor_is_bounded() {
        let runner = MockRunner::new().respond("vcgencmd", MockResponse::Hang);
        let probe = LocalMetricsProbe::new(Arc::new(runner));

        let started = Instant::now();
        let metrics = probe.poll().await.unwrap();
        assert_eq!(metrics.temperature, Err(ProbeError::Timeout(TEMPERATURE_TIMEOUT)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_hanging_usage_read_is_bounded() {
        let runner = MockRunner::new().stdout("vcgencmd", "temp=44.0'C\n");
        let probe = LocalMetricsProbe::with_sampler(Arc::new(runner), || {
            std::thread::sleep(Duration::from_secs(3));
            Ok((1.0, 2.0))
        });

        let started = Instant::now();
        let result = probe.poll().await;
        assert_eq!(result, Err(ProbeError::Timeout(SAMPLE_TIMEOUT)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
