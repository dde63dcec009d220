//! Path utilities for kubefan.
//!
//! All state lives under `~/.kubefan/` unless `KUBEFAN_HOME` points elsewhere:
//! - `~/.kubefan/config.toml` - main configuration
//! - `~/.kubefan/selected_contexts` - multi-context selection

use std::path::PathBuf;

/// Environment variable overriding the kubefan home directory.
pub const HOME_ENV: &str = "KUBEFAN_HOME";

/// Returns the kubefan home directory (`~/.kubefan/`).
pub fn home_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kubefan")
}

/// Returns the default config file path (`~/.kubefan/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default selection file path (`~/.kubefan/selected_contexts`).
pub fn default_selection_file() -> PathBuf {
    home_dir().join("selected_contexts")
}

/// Kubeconfig paths: `$KUBECONFIG` entries, else `~/.kube/config`.
pub fn default_kubeconfigs() -> Vec<PathBuf> {
    if let Some(value) = std::env::var_os("KUBECONFIG").filter(|v| !v.is_empty()) {
        let paths: Vec<PathBuf> = std::env::split_paths(&value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        if !paths.is_empty() {
            return paths;
        }
    }
    vec![dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kube")
        .join("config")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_files_live_under_home() {
        let home = home_dir();
        assert!(default_config().starts_with(&home));
        assert!(default_selection_file().starts_with(&home));
        assert!(default_selection_file().ends_with("selected_contexts"));
    }
}
