//! `kubectl` process runner.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::port::{CommandOutput, CommandRunner};

/// Runs a fixed binary (normally `kubectl`) with per-call arguments.
#[derive(Debug, Clone)]
pub struct KubectlRunner {
    binary: String,
}

impl KubectlRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for KubectlRunner {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

#[async_trait]
impl CommandRunner for KubectlRunner {
    async fn run(&self, args: &[String]) -> std::io::Result<CommandOutput> {
        debug!(binary = %self.binary, ?args, "Spawning process");
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
