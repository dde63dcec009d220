//! Configuration loading from files.

use std::fs;
use std::time::Duration;

use kubefan::error::{ConfigError, Error};
use kubefan::infrastructure::config::settings::Config;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.fanout.max_parallel, 10);
    assert_eq!(config.fanout.version_timeout(), Duration::from_secs(5));
    assert_eq!(config.supervisor.max_conn_retry, 5);
}

#[test]
fn full_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
kubectl = "kubectl-1.30"
kubeconfig = "/etc/kube/config"

[logging]
level = "debug"
format = "json"

[fanout]
max_parallel = 20
command_max_parallel = 4
version_timeout_ms = 1500
command_timeout_ms = 60000

[client]
qps = 100
burst = 200

[supervisor]
refresh_interval_secs = 5
max_delay_secs = 60
backoff_multiplier = 1.5
max_conn_retry = 8
probe_timeout_ms = 2000
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.fanout.command_max_parallel, 4);
    assert_eq!(config.fanout.command_timeout(), Some(Duration::from_secs(60)));
    assert_eq!(config.fanout.list_timeout(), None);
    assert_eq!(config.client.burst, 200);
    assert_eq!(config.supervisor.probe_timeout(), Duration::from_secs(2));
    assert_eq!(
        config.kubeconfig_paths(),
        vec![std::path::PathBuf::from("/etc/kube/config")]
    );

    let retry = config.supervisor.retry_state();
    assert_eq!(retry.max_failures(), 8);
    assert_eq!(retry.max_delay(), Duration::from_secs(60));
}

#[test]
fn invalid_values_are_rejected() {
    for (doc, field) in [
        ("[fanout]\ncommand_max_parallel = 0\n", "command_max_parallel"),
        ("[supervisor]\nbackoff_multiplier = 0.5\n", "backoff_multiplier"),
        ("[supervisor]\nrefresh_interval_secs = 30\nmax_delay_secs = 10\n", "max_delay_secs"),
        ("[supervisor]\nmax_conn_retry = 0\n", "max_conn_retry"),
    ] {
        match Config::parse_toml(doc) {
            Err(Error::Config(ConfigError::InvalidValue { field: got, .. })) => {
                assert_eq!(got, field);
            }
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = Config::parse_toml("[fanout\nmax_parallel = 1").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}
