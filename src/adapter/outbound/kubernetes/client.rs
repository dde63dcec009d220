//! HTTP client for one Kubernetes context.

use async_trait::async_trait;
use reqwest::{Certificate, Identity, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::kubeconfig::{Auth, ConnectionParams};
use super::limiter::TokenBucket;
use crate::domain::GroupVersionResource;
use crate::error::{Error, Result};
use crate::infrastructure::config::client::ClientConfig;
use crate::port::ClusterClient;

#[derive(Deserialize)]
struct ListBody {
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionBody {
    git_version: String,
}

#[derive(Deserialize)]
struct StatusBody {
    #[serde(default)]
    message: String,
}

/// Rate-limited API client bound to one context.
pub struct KubeClient {
    context: String,
    server: Url,
    auth: Auth,
    http: reqwest::Client,
    limiter: TokenBucket,
}

impl KubeClient {
    /// Build a client from resolved connection parameters.
    ///
    /// # Errors
    ///
    /// `Connection` when TLS material is unusable or the HTTP client cannot
    /// be constructed.
    pub fn new(params: ConnectionParams, config: &ClientConfig) -> Result<Self> {
        let context = params.context.clone();
        let failed = |reason: String| Error::Connection {
            context: context.clone(),
            reason,
        };

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(ca) = &params.ca_pem {
            let cert = Certificate::from_pem(ca).map_err(|e| failed(format!("CA: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }
        if params.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(pem) = &params.identity_pem {
            let identity =
                Identity::from_pem(pem).map_err(|e| failed(format!("client certificate: {e}")))?;
            builder = builder.identity(identity);
        }
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| failed(e.to_string()))?;

        Ok(Self {
            context: params.context,
            server: params.server,
            auth: params.auth,
            http,
            limiter: TokenBucket::new(config.qps, config.burst),
        })
    }

    /// Server URL with `segments` appended to its path.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.server.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Connection {
                context: self.context.clone(),
                reason: format!("server URL {} cannot carry a path", self.server),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn resource_url(
        &self,
        gvr: &GroupVersionResource,
        namespace: Option<&str>,
        name: Option<&str>,
    ) -> Result<Url> {
        let mut segments: Vec<&str> = if gvr.is_core() {
            vec!["api", gvr.version.as_str()]
        } else {
            vec!["apis", gvr.group.as_str(), gvr.version.as_str()]
        };
        if let Some(ns) = namespace {
            segments.extend(["namespaces", ns]);
        }
        segments.push(gvr.resource.as_str());
        if let Some(name) = name {
            segments.push(name);
        }
        self.url(&segments)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::None => request,
            Auth::Bearer(token) => request.bearer_auth(token),
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.limiter.acquire().await;
        debug!(context = %self.context, url = %url, "GET");

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| self.api_error(e.to_string()))?;
        let response = self.check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| self.api_error(format!("decode response: {e}")))
    }

    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<StatusBody>(&body)
            .map(|s| s.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or(body);
        Err(self.api_error(format!("{status}: {}", message.trim())))
    }

    fn api_error(&self, reason: String) -> Error {
        Error::List {
            context: self.context.clone(),
            reason,
        }
    }
}

#[async_trait]
impl ClusterClient for KubeClient {
    fn context(&self) -> &str {
        &self.context
    }

    async fn list(
        &self,
        gvr: &GroupVersionResource,
        namespace: Option<&str>,
        label_selector: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut url = self.resource_url(gvr, namespace, None)?;
        if let Some(selector) = label_selector.filter(|s| !s.is_empty()) {
            url.query_pairs_mut().append_pair("labelSelector", selector);
        }
        let body: ListBody = self.get_json(url).await?;
        Ok(body.items)
    }

    async fn get(
        &self,
        gvr: &GroupVersionResource,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Value> {
        let url = self.resource_url(gvr, namespace, Some(name))?;
        self.get_json(url).await
    }

    async fn server_version(&self) -> Result<String> {
        let url = self.url(&["version"])?;
        let body: VersionBody = self.get_json(url).await?;
        Ok(body.git_version)
    }
}
