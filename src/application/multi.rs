//! Multi-context operations exposed to callers.
//!
//! [`MultiContext`] ties the registry, the dispatcher and the aggregation
//! shapes together. Every operation returns a usable, possibly partial,
//! result; per-context failures never fail the call.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::command::{fold_output, inject_context_flag};
use super::fanout::{aggregate, ConnectionRegistry, Dispatcher};
use crate::domain::{
    scoped_namespace, CommandResult, ContextObject, GroupVersionResource, RowId, NA,
};
use crate::error::{Error, Result};
use crate::infrastructure::config::fanout::FanoutConfig;
use crate::port::{ClusterClient, CommandRunner};

/// Fan-out service over a shared connection registry.
pub struct MultiContext {
    registry: Arc<ConnectionRegistry>,
    runner: Arc<dyn CommandRunner>,
    policy: FanoutConfig,
}

impl MultiContext {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        runner: Arc<dyn CommandRunner>,
        policy: FanoutConfig,
    ) -> Self {
        Self {
            registry,
            runner,
            policy,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn policy(&self) -> &FanoutConfig {
        &self.policy
    }

    /// List `gvr` on every context and merge the objects, tagged by origin.
    ///
    /// `namespace` of `None`, `""`, `"-"` or `"all"` lists across all
    /// namespaces.
    pub async fn list_across_contexts(
        &self,
        contexts: &[String],
        gvr: &GroupVersionResource,
        namespace: Option<&str>,
        label_selector: Option<&str>,
    ) -> Vec<ContextObject> {
        let namespace = scoped_namespace(namespace).map(str::to_string);
        let selector = label_selector
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let dispatcher =
            Dispatcher::new(self.policy.max_parallel).with_timeout(self.policy.list_timeout());

        let results = dispatcher
            .run(contexts, |context| {
                let registry = Arc::clone(&self.registry);
                let gvr = gvr.clone();
                let namespace = namespace.clone();
                let selector = selector.clone();
                async move {
                    let client = registry.get(&context)?;
                    client
                        .list(&gvr, namespace.as_deref(), selector.as_deref())
                        .await
                }
            })
            .await;

        let merged = aggregate::tagged_list(results);
        debug!(resource = %gvr, objects = merged.len(), "Merged multi-context listing");
        merged
    }

    /// Server version per context; failures and timeouts read `N/A`.
    pub async fn server_versions(&self, contexts: &[String]) -> BTreeMap<String, String> {
        let dispatcher = Dispatcher::new(self.policy.max_parallel)
            .with_timeout(Some(self.policy.version_timeout()));

        let results = dispatcher
            .run(contexts, |context| {
                let registry = Arc::clone(&self.registry);
                async move { registry.get(&context)?.server_version().await }
            })
            .await;

        aggregate::keyed_with_sentinel(results, NA)
    }

    /// Run `kubectl <args> --context <ctx>` on every context.
    ///
    /// Results are in `contexts` order. `max_parallel == 0` means the default.
    pub async fn run_command_across_contexts(
        &self,
        contexts: &[String],
        args: &[String],
        max_parallel: usize,
    ) -> Vec<CommandResult> {
        debug!(
            contexts = contexts.len(),
            command = %args.join(" "),
            "Running command across contexts"
        );
        let dispatcher =
            Dispatcher::new(max_parallel).with_timeout(self.policy.command_timeout());

        let results = dispatcher
            .run(contexts, |context| {
                let runner = Arc::clone(&self.runner);
                let local = inject_context_flag(args, &context);
                async move {
                    let output = runner.run(&local).await;
                    fold_output(&context, output)
                }
            })
            .await;

        aggregate::positional_folded(results)
    }

    /// Client and resource path a row ID points at.
    ///
    /// Single-cluster IDs route to `active`.
    ///
    /// # Errors
    ///
    /// `ConfigResolution` when the ID carries no context and there is no
    /// active one, or any registry error for the owning context.
    pub fn route(
        &self,
        row: &RowId,
        active: Option<&str>,
    ) -> Result<(Arc<dyn ClusterClient>, String)> {
        let (context, path) = row.split();
        let context = match (context, active) {
            ("", Some(active)) => active,
            ("", None) => {
                return Err(Error::ConfigResolution {
                    context: String::new(),
                    reason: format!("row {row} has no context and no context is active"),
                })
            }
            (context, _) => context,
        };
        Ok((self.registry.get(context)?, path.to_string()))
    }

    /// Fetch the object behind a row ID from its owning context.
    ///
    /// # Errors
    ///
    /// Routing errors from [`route`](Self::route) or the API error for the
    /// lookup.
    pub async fn get_by_row(
        &self,
        gvr: &GroupVersionResource,
        row: &RowId,
        active: Option<&str>,
    ) -> Result<ContextObject> {
        let (client, path) = self.route(row, active)?;
        let (namespace, name) = match path.split_once('/') {
            Some((ns, name)) => (Some(ns), name),
            None => (None, path.as_str()),
        };
        let object: Value = client.get(gvr, namespace, name).await?;
        Ok(ContextObject::new(client.context(), object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::cluster::{object, ContextScript, ScriptedFactory};
    use crate::testkit::process::ScriptedRunner;

    fn service(factory: ScriptedFactory) -> MultiContext {
        let registry = Arc::new(ConnectionRegistry::new(Arc::new(factory)));
        MultiContext::new(
            registry,
            Arc::new(ScriptedRunner::new()),
            FanoutConfig::default(),
        )
    }

    #[tokio::test]
    async fn listing_filters_by_namespace_and_selector() {
        let svc = service(ScriptedFactory::new().with_context(
            "a",
            ContextScript::healthy("v1").with_objects(vec![
                object("default", "web"),
                object("default", "db"),
                object("kube-system", "dns"),
            ]),
        ));
        let pods = GroupVersionResource::core("pods");
        let contexts = vec!["a".to_string()];

        let all = svc.list_across_contexts(&contexts, &pods, Some("all"), None).await;
        assert_eq!(all.len(), 3);

        let default = svc
            .list_across_contexts(&contexts, &pods, Some("default"), Some("app=web"))
            .await;
        assert_eq!(default.len(), 1);
        assert_eq!(default[0].path(), "default/web");
    }

    #[tokio::test]
    async fn row_routing_uses_owning_context() {
        let svc = service(
            ScriptedFactory::new()
                .with_context(
                    "a",
                    ContextScript::healthy("v1").with_objects(vec![object("default", "web")]),
                )
                .with_context(
                    "b",
                    ContextScript::healthy("v1").with_objects(vec![object("default", "api")]),
                ),
        );
        let pods = GroupVersionResource::core("pods");

        let found = svc
            .get_by_row(&pods, &RowId::join("b", "default/api"), Some("a"))
            .await
            .unwrap();
        assert_eq!(found.context, "b");
        assert_eq!(found.name(), "api");

        let single = svc
            .get_by_row(&pods, &RowId::from("default/web"), Some("a"))
            .await
            .unwrap();
        assert_eq!(single.context, "a");

        let err = svc
            .get_by_row(&pods, &RowId::from("default/web"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigResolution { .. }));
    }
}
