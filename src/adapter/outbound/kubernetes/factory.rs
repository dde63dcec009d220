//! Client factory backed by a kubeconfig source.

use std::sync::Arc;

use tracing::debug;

use super::client::KubeClient;
use super::kubeconfig::KubeconfigSource;
use crate::error::Result;
use crate::infrastructure::config::client::ClientConfig;
use crate::port::{ClientFactory, ClusterClient};

/// Builds rate-limited [`KubeClient`]s for named contexts.
pub struct KubeClientFactory {
    source: Arc<KubeconfigSource>,
    config: ClientConfig,
}

impl KubeClientFactory {
    pub fn new(source: Arc<KubeconfigSource>, config: ClientConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub fn source(&self) -> &Arc<KubeconfigSource> {
        &self.source
    }
}

impl ClientFactory for KubeClientFactory {
    fn build(&self, context: &str) -> Result<Arc<dyn ClusterClient>> {
        let params = self.source.resolve(context)?;
        debug!(
            context,
            server = %params.server,
            qps = self.config.qps,
            burst = self.config.burst,
            "Building cluster client"
        );
        Ok(Arc::new(KubeClient::new(params, &self.config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::kubernetes::kubeconfig::Kubeconfig;
    use crate::error::Error;

    #[test]
    fn builds_known_context_and_rejects_unknown() {
        let config = Kubeconfig::parse(
            r#"
clusters:
  - name: c
    cluster:
      server: https://c.example.com
contexts:
  - name: ctx
    context:
      cluster: c
"#,
        )
        .unwrap();
        let factory = KubeClientFactory::new(
            Arc::new(KubeconfigSource::from_config(config)),
            ClientConfig::default(),
        );

        let client = factory.build("ctx").unwrap();
        assert_eq!(client.context(), "ctx");

        let err = factory.build("nope").err().unwrap();
        assert!(matches!(err, Error::ConfigResolution { .. }));
    }
}
