//! Connectivity probe against the active context.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::fanout::ConnectionRegistry;
use crate::port::ConnectivityProbe;

/// Healthy when `/version` on `context` answers within `timeout`.
pub struct VersionProbe {
    registry: Arc<ConnectionRegistry>,
    context: String,
    timeout: Duration,
}

impl VersionProbe {
    pub fn new(registry: Arc<ConnectionRegistry>, context: impl Into<String>, timeout: Duration) -> Self {
        Self {
            registry,
            context: context.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ConnectivityProbe for VersionProbe {
    async fn check(&self) -> bool {
        let client = match self.registry.get(&self.context) {
            Ok(client) => client,
            Err(e) => {
                debug!(context = %self.context, error = %e, "Probe could not get client");
                return false;
            }
        };
        match tokio::time::timeout(self.timeout, client.server_version()).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!(context = %self.context, error = %e, "Probe failed");
                false
            }
            Err(_) => {
                debug!(context = %self.context, "Probe timed out");
                false
            }
        }
    }
}
