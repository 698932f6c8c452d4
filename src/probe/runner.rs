//! Command runner abstraction for the external tools probes talk to.
//!
//! `CommandRunner` is the seam between probes and the operating system.
//! `SystemRunner` is the production implementation backed by
//! `tokio::process`; tests use `MockRunner`, which serves canned responses.

use std::fmt::Debug;
use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::ProbeError;

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run that printed `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run that printed `stderr`.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for locating and running external programs.
///
/// Implementations never apply a timeout themselves; probes bound every call
/// with [`bounded`](super::bounded). Dropping the returned future must not
/// leave a child process running.
#[async_trait]
pub trait CommandRunner: Send + Sync + Debug {
    /// Resolve `program` against the search path.
    fn which(&self, program: &str) -> Option<String>;

    /// Run `program` with `args` to completion and capture its output.
    ///
    /// A program that cannot be found maps to [`ProbeError::ToolMissing`].
    async fn output(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError>;
}

/// Runner that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    fn which(&self, program: &str) -> Option<String> {
        let path_var = std::env::var_os("PATH")?;
        std::env::split_paths(&path_var)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
            .map(|candidate| candidate.to_string_lossy().into_owned())
    }

    async fn output(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ProbeError::ToolMissing(program.to_string()),
                _ => ProbeError::Command(format!("{}: {}", program, e)),
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
pub use mock::{MockResponse, MockRunner};

#[cfg(test)]
mod mock {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use super::*;

    /// What a [`MockRunner`] does when a program is invoked.
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        Output(CommandOutput),
        Fail(ProbeError),
        /// Never finishes; used to check probe timeouts.
        Hang,
    }

    /// Test-double runner that serves pre-configured responses per program.
    ///
    /// Programs are keyed by file name, so `/usr/sbin/tailscale` and
    /// `tailscale` share a response. Unknown programs behave as if missing.
    #[derive(Debug, Default)]
    pub struct MockRunner {
        installed: HashSet<String>,
        responses: HashMap<String, MockResponse>,
        calls: Mutex<Vec<String>>,
    }

    impl MockRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make `which(program)` succeed with `/usr/bin/<program>`.
        pub fn installed(mut self, program: &str) -> Self {
            self.installed.insert(program.to_string());
            self
        }

        pub fn respond(mut self, program: &str, response: MockResponse) -> Self {
            self.responses.insert(program.to_string(), response);
            self
        }

        /// Shorthand for a successful run printing `stdout`.
        pub fn stdout(self, program: &str, stdout: &str) -> Self {
            self.respond(program, MockResponse::Output(CommandOutput::ok(stdout)))
        }

        /// Every invocation so far, as `program arg arg...`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    fn base_name(program: &str) -> &str {
        program.rsplit('/').next().unwrap_or(program)
    }

    #[async_trait]
    impl CommandRunner for MockRunner {
        fn which(&self, program: &str) -> Option<String> {
            self.installed
                .contains(program)
                .then(|| format!("/usr/bin/{}", program))
        }

        async fn output(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError> {
            if let Ok(mut calls) = self.calls.lock() {
                let mut line = vec![program];
                line.extend_from_slice(args);
                calls.push(line.join(" "));
            }

            match self.responses.get(base_name(program)).cloned() {
                Some(MockResponse::Output(output)) => Ok(output),
                Some(MockResponse::Fail(err)) => Err(err),
                Some(MockResponse::Hang) => std::future::pending().await,
                None => Err(ProbeError::ToolMissing(program.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::probe::bounded;

    #[tokio::test]
    async fn test_system_runner_captures_stdout() {
        let output = SystemRunner
            .output("sh", &["-c", "echo running"])
            .await
            .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "running");
    }

    #[tokio::test]
    async fn test_system_runner_reports_exit_failure() {
        let output = SystemRunner
            .output("sh", &["-c", "echo nope >&2; exit 3"])
            .await
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.stderr.trim(), "nope");
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let err = SystemRunner
            .output("definitely-not-an-installed-tool-4242", &[])
            .await
            .unwrap_err();
        assert!(err.is_tool_missing());
    }

    #[tokio::test]
    async fn test_hanging_command_is_cut_off() {
        let limit = Duration::from_millis(200);
        let started = Instant::now();
        let result = bounded(limit, SystemRunner.output("sleep", &["30"])).await;
        assert_eq!(result, Err(ProbeError::Timeout(limit)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_which_finds_shell() {
        let path = SystemRunner.which("sh").expect("sh on PATH");
        assert!(path.ends_with("/sh"));
        assert!(SystemRunner
            .which("definitely-not-an-installed-tool-4242")
            .is_none());
    }

    #[tokio::test]
    async fn test_mock_runner_records_calls() {
        let runner = MockRunner::new().stdout("docker", "running\n");
        let output = runner
            .output("docker", &["inspect", "jenkins"])
            .await
            .unwrap();
        assert_eq!(output.stdout, "running\n");
        assert_eq!(runner.calls(), vec!["docker inspect jenkins".to_string()]);
        let err = runner.output("gcloud", &[]).await.unwrap_err();
        assert!(err.is_tool_missing());
    }
}
