use std::fs;
use std::path::{Path, PathBuf};

/// Kubeconfig with three contexts on unroutable endpoints; `alpha` is current.
pub const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: alpha
clusters:
  - name: alpha
    cluster:
      server: https://127.0.0.1:1
      insecure-skip-tls-verify: true
  - name: beta
    cluster:
      server: https://127.0.0.1:2
      insecure-skip-tls-verify: true
users:
  - name: dev
    user:
      token: test-token
contexts:
  - name: alpha
    context:
      cluster: alpha
      user: dev
  - name: beta
    context:
      cluster: beta
      user: dev
      namespace: team-b
  - name: gamma
    context:
      cluster: alpha
      user: dev
"#;

/// Write [`KUBECONFIG`] into `dir` and return its path.
pub fn write_kubeconfig(dir: &Path) -> PathBuf {
    let path = dir.join("kubeconfig");
    fs::write(&path, KUBECONFIG).expect("write kubeconfig");
    path
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}
