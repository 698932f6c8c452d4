//! Error types for probes.

use std::time::Duration;

use thiserror::Error;

/// Reasons a probe could not produce a value.
///
/// None of these ever leave a probe as a failure of the dashboard itself:
/// they travel as the `Err` half of a [`ProbeResult`](super::ProbeResult)
/// and are turned into a placeholder when the frame is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The external tool is not installed or could not be found.
    #[error("{0} not found")]
    ToolMissing(String),

    /// The probe did not answer within its bound.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The tool answered with output we could not understand.
    #[error("failed to parse output: {0}")]
    Parse(String),

    /// The tool ran but reported a failure.
    #[error("command failed: {0}")]
    Command(String),

    /// Background work backing the probe panicked or was cancelled.
    #[error("probe task failed: {0}")]
    Task(String),
}

impl ProbeError {
    /// True when the failure means "not installed" rather than "not working".
    pub fn is_tool_missing(&self) -> bool {
        matches!(self, ProbeError::ToolMissing(_))
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Parse(err.to_string())
    }
}
