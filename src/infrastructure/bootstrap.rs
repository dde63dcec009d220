//! Composition root: wires config, adapters and services into a session.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapter::outbound::kubectl::KubectlRunner;
use crate::adapter::outbound::kubernetes::{KubeClientFactory, KubeconfigSource};
use crate::adapter::outbound::selection::FileSelectionStore;
use crate::application::selection::effective_contexts;
use crate::application::{ConnectionRegistry, MultiContext};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{ContextSource, SelectionStore};

/// Everything a command needs for one run of the tool.
///
/// Created at startup, reloaded in place, dropped at exit.
pub struct Session {
    pub config: Config,
    pub contexts: Arc<dyn ContextSource>,
    pub registry: Arc<ConnectionRegistry>,
    pub multi: MultiContext,
    pub selection: Arc<dyn SelectionStore>,
    source: Option<Arc<KubeconfigSource>>,
}

impl Session {
    /// Build a session backed by kubeconfig files and `kubectl`.
    ///
    /// # Errors
    ///
    /// Returns an error when a kubeconfig file exists but cannot be parsed.
    pub fn build(config: Config) -> Result<Self> {
        let paths = config.kubeconfig_paths();
        debug!(?paths, "Loading kubeconfig");
        let source = Arc::new(KubeconfigSource::load(paths)?);

        let factory = Arc::new(KubeClientFactory::new(
            Arc::clone(&source),
            config.client.clone(),
        ));
        let registry = Arc::new(ConnectionRegistry::new(factory));
        let runner = Arc::new(KubectlRunner::new(config.kubectl.clone()));
        let selection = Arc::new(FileSelectionStore::new(config.selection_path()));
        let multi = MultiContext::new(Arc::clone(&registry), runner, config.fanout.clone());

        debug!(
            contexts = source.context_names().len(),
            current = ?source.current_context(),
            "Session ready"
        );

        Ok(Self {
            config,
            contexts: source.clone(),
            registry,
            multi,
            selection,
            source: Some(source),
        })
    }

    /// Assemble a session from already-built parts.
    pub fn from_parts(
        config: Config,
        contexts: Arc<dyn ContextSource>,
        registry: Arc<ConnectionRegistry>,
        multi: MultiContext,
        selection: Arc<dyn SelectionStore>,
    ) -> Self {
        Self {
            config,
            contexts,
            registry,
            multi,
            selection,
            source: None,
        }
    }

    /// Active kubeconfig context, ignoring an empty value.
    #[must_use]
    pub fn active_context(&self) -> Option<String> {
        self.contexts
            .current_context()
            .filter(|c| !c.is_empty())
    }

    /// Contexts a batch should run against.
    ///
    /// Explicit names win; otherwise the persisted selection, falling back to
    /// the active context when fewer than two are selected.
    pub fn batch_contexts(&self, explicit: &[String]) -> Result<Vec<String>> {
        if !explicit.is_empty() {
            return Ok(explicit.to_vec());
        }
        let selected = self.selection.load()?;
        Ok(effective_contexts(
            &selected,
            self.active_context().as_deref(),
        ))
    }

    /// Re-read kubeconfig files and drop every cached client.
    pub fn reload(&self) -> Result<()> {
        if let Some(source) = &self.source {
            source.reload()?;
        }
        self.registry.reset();
        info!("Session configuration reloaded");
        Ok(())
    }
}
