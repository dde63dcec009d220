//! Hooks driven by the connectivity supervisor.

use async_trait::async_trait;

use crate::error::Result;

/// One connectivity check against the active connection.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn check(&self) -> bool;
}

/// A consumer that should only run while the cluster is reachable, such as a
/// live-refresh loop.
pub trait LiveConsumer: Send + Sync {
    fn pause(&self);
    fn resume(&self);
}

/// Severity of a user-visible status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

/// Where user-visible status messages go.
pub trait StatusSink: Send + Sync {
    fn status(&self, level: StatusLevel, message: &str);
    fn clear(&self);
}

/// Best-effort refresh kicked off after a healthy probe.
#[async_trait]
pub trait SideRefresh: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}
