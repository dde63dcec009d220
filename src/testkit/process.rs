//! Scripted [`CommandRunner`] keyed by the `--context` argument.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::cluster::InFlight;
use crate::port::{CommandOutput, CommandRunner};

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    SpawnError(String),
}

/// Replies per context, with optional latency; records every invocation.
pub struct ScriptedRunner {
    replies: HashMap<String, (Duration, Reply)>,
    calls: Mutex<Vec<Vec<String>>>,
    in_flight: Arc<InFlight>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            in_flight: InFlight::new(),
        }
    }

    pub fn with_output(mut self, context: &str, delay: Duration, output: CommandOutput) -> Self {
        self.replies
            .insert(context.to_string(), (delay, Reply::Output(output)));
        self
    }

    pub fn with_spawn_error(mut self, context: &str, message: &str) -> Self {
        self.replies.insert(
            context.to_string(),
            (Duration::ZERO, Reply::SpawnError(message.to_string())),
        );
        self
    }

    /// Argument lists in invocation order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    pub fn in_flight(&self) -> Arc<InFlight> {
        Arc::clone(&self.in_flight)
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn context_arg(args: &[String]) -> Option<&str> {
    args.windows(2)
        .find(|pair| pair[0] == "--context")
        .map(|pair| pair[1].as_str())
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, args: &[String]) -> std::io::Result<CommandOutput> {
        self.calls.lock().push(args.to_vec());
        let _guard = self.in_flight.enter();

        let context = context_arg(args).unwrap_or_default();
        let (delay, reply) = self
            .replies
            .get(context)
            .cloned()
            .unwrap_or((Duration::ZERO, Reply::Output(CommandOutput::ok(""))));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Reply::Output(output) => Ok(output),
            Reply::SpawnError(message) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                message,
            )),
        }
    }
}
