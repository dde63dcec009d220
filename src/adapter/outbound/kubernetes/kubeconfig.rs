//! Kubeconfig parsing, merging and per-context resolution.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::port::ContextSource;

/// Parsed kubeconfig document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Kubeconfig {
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
    #[serde(default)]
    pub users: Vec<NamedUser>,
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
    #[serde(default)]
    pub current_context: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: ClusterEntry,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEntry {
    pub server: String,
    #[serde(default)]
    pub certificate_authority: Option<PathBuf>,
    #[serde(default)]
    pub certificate_authority_data: Option<String>,
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedUser {
    pub name: String,
    #[serde(default)]
    pub user: UserEntry,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserEntry {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "tokenFile")]
    pub token_file: Option<PathBuf>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub client_certificate: Option<PathBuf>,
    #[serde(default)]
    pub client_certificate_data: Option<String>,
    #[serde(default)]
    pub client_key: Option<PathBuf>,
    #[serde(default)]
    pub client_key_data: Option<String>,
    #[serde(default)]
    pub exec: Option<serde_yaml::Value>,
    #[serde(default)]
    pub auth_provider: Option<serde_yaml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: ContextEntry,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextEntry {
    pub cluster: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Credentials presented to the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    None,
    Bearer(String),
    Basic { username: String, password: String },
}

/// Everything needed to build a client for one context.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub context: String,
    pub server: Url,
    pub ca_pem: Option<Vec<u8>>,
    pub insecure: bool,
    pub auth: Auth,
    /// Client certificate followed by its key, PEM encoded.
    pub identity_pem: Option<Vec<u8>>,
    pub namespace: Option<String>,
}

impl Kubeconfig {
    /// Parse one kubeconfig document.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and merge kubeconfig files; missing files are skipped.
    pub fn read_from(paths: &[PathBuf]) -> Result<Self> {
        let mut merged = Self::default();
        for path in paths {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let mut document = Self::parse(&content)?;
                    if let Some(dir) = path.parent() {
                        document.anchor_paths(dir);
                    }
                    merged.merge(document);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "Kubeconfig not found, skipping");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(merged)
    }

    /// Rebase relative file references onto `dir`, the directory of the
    /// file this document was read from.
    pub fn anchor_paths(&mut self, dir: &Path) {
        for cluster in &mut self.clusters {
            anchor(&mut cluster.cluster.certificate_authority, dir);
        }
        for user in &mut self.users {
            anchor(&mut user.user.token_file, dir);
            anchor(&mut user.user.client_certificate, dir);
            anchor(&mut user.user.client_key, dir);
        }
    }

    /// Merge `other` into `self`; entries already present win.
    pub fn merge(&mut self, other: Self) {
        for cluster in other.clusters {
            if !self.clusters.iter().any(|c| c.name == cluster.name) {
                self.clusters.push(cluster);
            }
        }
        for user in other.users {
            if !self.users.iter().any(|u| u.name == user.name) {
                self.users.push(user);
            }
        }
        for context in other.contexts {
            if !self.contexts.iter().any(|c| c.name == context.name) {
                self.contexts.push(context);
            }
        }
        let current_missing = self
            .current_context
            .as_deref()
            .map_or(true, str::is_empty);
        if current_missing {
            self.current_context = other.current_context.filter(|c| !c.is_empty());
        }
    }

    #[must_use]
    pub fn context_names(&self) -> Vec<String> {
        self.contexts.iter().map(|c| c.name.clone()).collect()
    }

    /// Resolve the named context into connection parameters.
    ///
    /// # Errors
    ///
    /// `ConfigResolution` when the context, its cluster or its user are
    /// missing, or when the user relies on an unsupported auth plugin.
    pub fn resolve(&self, name: &str) -> Result<ConnectionParams> {
        let unresolved = |reason: String| Error::ConfigResolution {
            context: name.to_string(),
            reason,
        };

        let context = self
            .contexts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| unresolved("context not found".to_string()))?;
        let cluster = self
            .clusters
            .iter()
            .find(|c| c.name == context.context.cluster)
            .ok_or_else(|| unresolved(format!("cluster {:?} not found", context.context.cluster)))?;

        let user = if context.context.user.is_empty() {
            UserEntry::default()
        } else {
            self.users
                .iter()
                .find(|u| u.name == context.context.user)
                .map(|u| u.user.clone())
                .ok_or_else(|| unresolved(format!("user {:?} not found", context.context.user)))?
        };
        if user.exec.is_some() || user.auth_provider.is_some() {
            return Err(unresolved(
                "exec and auth-provider credential plugins are not supported".to_string(),
            ));
        }

        let server = Url::parse(&cluster.cluster.server)
            .map_err(|e| unresolved(format!("invalid server {:?}: {e}", cluster.cluster.server)))?;

        let ca_pem = read_material(
            cluster.cluster.certificate_authority_data.as_deref(),
            cluster.cluster.certificate_authority.as_deref(),
        )
        .map_err(unresolved)?;

        let auth = if let Some(token) = user.token.clone().filter(|t| !t.is_empty()) {
            Auth::Bearer(token)
        } else if let Some(path) = &user.token_file {
            let token = std::fs::read_to_string(path)
                .map_err(|e| unresolved(format!("token file {}: {e}", path.display())))?;
            Auth::Bearer(token.trim().to_string())
        } else if let (Some(username), Some(password)) = (&user.username, &user.password) {
            Auth::Basic {
                username: username.clone(),
                password: password.clone(),
            }
        } else {
            Auth::None
        };

        let cert = read_material(
            user.client_certificate_data.as_deref(),
            user.client_certificate.as_deref(),
        )
        .map_err(unresolved)?;
        let key = read_material(user.client_key_data.as_deref(), user.client_key.as_deref())
            .map_err(unresolved)?;
        let identity_pem = match (cert, key) {
            (Some(mut cert), Some(key)) => {
                if !cert.ends_with(b"\n") {
                    cert.push(b'\n');
                }
                cert.extend_from_slice(&key);
                Some(cert)
            }
            (None, None) => None,
            _ => {
                return Err(unresolved(
                    "client certificate and key must be set together".to_string(),
                ))
            }
        };

        Ok(ConnectionParams {
            context: name.to_string(),
            server,
            ca_pem,
            insecure: cluster.cluster.insecure_skip_tls_verify,
            auth,
            identity_pem,
            namespace: context.context.namespace.clone(),
        })
    }
}

fn anchor(path: &mut Option<PathBuf>, dir: &Path) {
    if let Some(path) = path.as_mut().filter(|p| p.is_relative()) {
        *path = dir.join(&*path);
    }
}

/// Inline base64 data wins over a file path.
fn read_material(
    data: Option<&str>,
    path: Option<&Path>,
) -> std::result::Result<Option<Vec<u8>>, String> {
    if let Some(data) = data.filter(|d| !d.is_empty()) {
        return STANDARD
            .decode(data.trim())
            .map(Some)
            .map_err(|e| format!("invalid base64 data: {e}"));
    }
    match path {
        Some(path) => std::fs::read(path)
            .map(Some)
            .map_err(|e| format!("{}: {e}", path.display())),
        None => Ok(None),
    }
}

/// Kubeconfig-backed context source that can be reloaded in place.
pub struct KubeconfigSource {
    paths: Vec<PathBuf>,
    config: RwLock<Kubeconfig>,
}

impl KubeconfigSource {
    /// Read the kubeconfig files now.
    pub fn load(paths: Vec<PathBuf>) -> Result<Self> {
        let config = Kubeconfig::read_from(&paths)?;
        Ok(Self {
            paths,
            config: RwLock::new(config),
        })
    }

    /// Wrap an already-parsed kubeconfig (no backing files).
    pub fn from_config(config: Kubeconfig) -> Self {
        Self {
            paths: Vec::new(),
            config: RwLock::new(config),
        }
    }

    /// Re-read the backing files. Cached clients built from the old
    /// configuration must be dropped by the caller.
    pub fn reload(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Ok(());
        }
        let fresh = Kubeconfig::read_from(&self.paths)?;
        *self.config.write() = fresh;
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<ConnectionParams> {
        self.config.read().resolve(name)
    }
}

impl ContextSource for KubeconfigSource {
    fn context_names(&self) -> Vec<String> {
        self.config.read().context_names()
    }

    fn current_context(&self) -> Option<String> {
        self.config.read().current_context.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: a
clusters:
  - name: cluster-a
    cluster:
      server: https://a.example.com:6443
      certificate-authority-data: LS0tLS1CRUdJTg==
  - name: cluster-b
    cluster:
      server: https://rancher.example.com/k8s/clusters/c-123
      insecure-skip-tls-verify: true
users:
  - name: user-a
    user:
      token: abc
  - name: user-b
    user:
      username: admin
      password: secret
  - name: user-exec
    user:
      exec:
        command: aws
contexts:
  - name: a
    context:
      cluster: cluster-a
      user: user-a
      namespace: kube-system
  - name: b
    context:
      cluster: cluster-b
      user: user-b
  - name: broken
    context:
      cluster: missing
      user: user-a
  - name: exec
    context:
      cluster: cluster-a
      user: user-exec
"#;

    #[test]
    fn resolves_token_context() {
        let config = Kubeconfig::parse(CONFIG).unwrap();
        let params = config.resolve("a").unwrap();
        assert_eq!(params.server.as_str(), "https://a.example.com:6443/");
        assert_eq!(params.auth, Auth::Bearer("abc".into()));
        assert_eq!(params.ca_pem.as_deref(), Some(&b"-----BEGIN"[..]));
        assert_eq!(params.namespace.as_deref(), Some("kube-system"));
        assert!(!params.insecure);
    }

    #[test]
    fn resolves_basic_auth_and_insecure() {
        let config = Kubeconfig::parse(CONFIG).unwrap();
        let params = config.resolve("b").unwrap();
        assert!(params.insecure);
        assert!(matches!(params.auth, Auth::Basic { ref username, .. } if username == "admin"));
        assert_eq!(params.server.path(), "/k8s/clusters/c-123");
    }

    #[test]
    fn unresolvable_contexts_are_config_resolution_errors() {
        let config = Kubeconfig::parse(CONFIG).unwrap();
        for name in ["missing", "broken", "exec"] {
            let err = config.resolve(name).unwrap_err();
            assert!(
                matches!(err, Error::ConfigResolution { ref context, .. } if context == name),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn merge_keeps_first_occurrence() {
        let mut first = Kubeconfig::parse(CONFIG).unwrap();
        let second = Kubeconfig::parse(
            r#"
current-context: z
clusters:
  - name: cluster-z
    cluster:
      server: https://z.example.com
contexts:
  - name: a
    context:
      cluster: cluster-z
  - name: z
    context:
      cluster: cluster-z
"#,
        )
        .unwrap();
        first.merge(second);
        assert_eq!(first.current_context.as_deref(), Some("a"));
        assert_eq!(first.context_names(), vec!["a", "b", "broken", "exec", "z"]);
        assert_eq!(
            first.resolve("a").unwrap().server.host_str(),
            Some("a.example.com")
        );
        assert_eq!(first.resolve("z").unwrap().auth, Auth::None);
    }

    #[test]
    fn empty_document_is_empty_config() {
        let config = Kubeconfig::parse("   \n").unwrap();
        assert!(config.context_names().is_empty());
        assert!(config.current_context.is_none());
    }

    #[test]
    fn relative_files_resolve_next_to_their_kubeconfig() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("minikube");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("ca.crt"), "CA PEM").unwrap();
        std::fs::write(nested.join("token"), "t0ken\n").unwrap();
        std::fs::write(
            nested.join("config"),
            r#"
clusters:
  - name: mk
    cluster:
      server: https://192.168.49.2:8443
      certificate-authority: ca.crt
users:
  - name: mk
    user:
      tokenFile: ./token
contexts:
  - name: minikube
    context:
      cluster: mk
      user: mk
"#,
        )
        .unwrap();

        let config = Kubeconfig::read_from(&[nested.join("config")]).unwrap();
        let params = config.resolve("minikube").unwrap();
        assert_eq!(params.ca_pem.as_deref(), Some(&b"CA PEM"[..]));
        assert_eq!(params.auth, Auth::Bearer("t0ken".into()));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_files_are_left_alone() {
        let mut config = Kubeconfig::parse(
            r#"
clusters:
  - name: c
    cluster:
      server: https://c.example.com
      certificate-authority: /etc/k8s/ca.crt
"#,
        )
        .unwrap();
        config.anchor_paths(Path::new("/home/dev/.kube"));
        assert_eq!(
            config.clusters[0].cluster.certificate_authority.as_deref(),
            Some(Path::new("/etc/k8s/ca.crt"))
        );
    }

    #[test]
    fn source_reads_and_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, CONFIG).unwrap();

        let source =
            KubeconfigSource::load(vec![dir.path().join("absent"), path.clone()]).unwrap();
        assert_eq!(source.current_context().as_deref(), Some("a"));
        assert_eq!(source.context_names().len(), 4);

        std::fs::write(&path, "contexts: []\n").unwrap();
        source.reload().unwrap();
        assert!(source.context_names().is_empty());
    }
}
