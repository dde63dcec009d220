//! Process port for external command execution.

use async_trait::async_trait;

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs one command line to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Spawn with `args`, wait, and capture output.
    ///
    /// # Errors
    ///
    /// Returns the spawn error when the process could not be started.
    async fn run(&self, args: &[String]) -> std::io::Result<CommandOutput>;
}
