//! Cluster port for per-context Kubernetes API access.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::GroupVersionResource;
use crate::error::Result;

/// API client scoped to one context.
///
/// Handles are shared behind `Arc` and never mutated after construction.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Context this client talks to.
    fn context(&self) -> &str;

    /// List objects of a resource kind.
    ///
    /// `namespace = None` lists across all namespaces (or cluster-wide for
    /// cluster-scoped kinds).
    async fn list(
        &self,
        gvr: &GroupVersionResource,
        namespace: Option<&str>,
        label_selector: Option<&str>,
    ) -> Result<Vec<Value>>;

    /// Fetch a single named object.
    async fn get(
        &self,
        gvr: &GroupVersionResource,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Value>;

    /// Server version string (`gitVersion`).
    async fn server_version(&self) -> Result<String>;
}

/// Builds clients for named contexts.
pub trait ClientFactory: Send + Sync {
    /// Resolve the context and construct a client for it.
    ///
    /// # Errors
    ///
    /// `ConfigResolution` when the context profile is missing or unusable,
    /// `Connection` when the client cannot be constructed.
    fn build(&self, context: &str) -> Result<Arc<dyn ClusterClient>>;
}

/// Source of named contexts.
pub trait ContextSource: Send + Sync {
    fn context_names(&self) -> Vec<String>;

    /// The active context, if one is configured.
    fn current_context(&self) -> Option<String>;
}
