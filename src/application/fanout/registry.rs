//! Connection registry: one cached client handle per context name.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::port::{ClientFactory, ClusterClient};

/// Owns the client cache shared by every fan-out call site.
///
/// Entries are published whole and never mutated. Two concurrent first-time
/// lookups for the same context may both build a client; the first insert
/// wins and the other handle is dropped.
pub struct ConnectionRegistry {
    factory: Arc<dyn ClientFactory>,
    cache: DashMap<String, Arc<dyn ClusterClient>>,
}

impl ConnectionRegistry {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            cache: DashMap::new(),
        }
    }

    /// Cached client for `context`, building it on first use.
    ///
    /// # Errors
    ///
    /// `ConfigResolution` or `Connection` from the factory. Failures are not
    /// cached and do not touch other entries.
    pub fn get(&self, context: &str) -> Result<Arc<dyn ClusterClient>> {
        if let Some(client) = self.cache.get(context) {
            return Ok(Arc::clone(client.value()));
        }

        let client = self.factory.build(context)?;
        debug!(context, "Built cluster client");
        let entry = self.cache.entry(context.to_string()).or_insert(client);
        Ok(Arc::clone(entry.value()))
    }

    /// Drop every cached client; later lookups rebuild lazily.
    pub fn reset(&self) {
        let dropped = self.cache.len();
        self.cache.clear();
        debug!(dropped, "Connection registry reset");
    }

    #[must_use]
    pub fn contains(&self, context: &str) -> bool {
        self.cache.contains_key(context)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
