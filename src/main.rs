use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use kubefan::adapter::inbound::cli::command::Cli;
use kubefan::adapter::inbound::cli::diagnostic::{self, ConfigDiagnostic, ConnectionLost};
use kubefan::adapter::inbound::cli::output::{self, OutputConfig};
use kubefan::adapter::inbound::cli::dispatch;
use kubefan::error::{ConfigError, Error};
use kubefan::infrastructure::config::paths;
use kubefan::infrastructure::config::settings::Config;
use kubefan::infrastructure::Session;
use tracing::{debug, error};

/// Load the config file, rendering parse errors with source context.
///
/// A missing default file yields defaults; a missing `--config` file is an
/// error.
fn load_config(path: &Path, explicit: bool) -> Option<Config> {
    if !explicit && !path.exists() {
        return Some(Config::default());
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            output::error(&format!("failed to read {}: {e}", path.display()));
            return None;
        }
    };
    match Config::parse_toml(&content) {
        Ok(config) => Some(config),
        Err(Error::Config(ConfigError::Parse(e))) => {
            diagnostic::report(ConfigDiagnostic::from_toml(path, &content, &e));
            None
        }
        Err(e) => {
            output::error(&format!("{}: {e}", path.display()));
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose, &cli.color));

    let config_path = cli.config.clone().unwrap_or_else(paths::default_config);
    let Some(config) = load_config(&config_path, cli.config.is_some()) else {
        return ExitCode::FAILURE;
    };
    config
        .logging
        .init_with_verbosity(cli.verbose, cli.quiet);
    debug!(config = %config_path.display(), "kubefan starting");

    let session = match Session::build(config) {
        Ok(session) => session,
        Err(e) => {
            output::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match dispatch::run(&session, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Disconnected { failures, max }) => {
            error!(failures, max, "Session ended");
            diagnostic::report(ConnectionLost { failures, max });
            ExitCode::FAILURE
        }
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
