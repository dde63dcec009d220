//! Command-line interface definitions.
//!
//! Defines the CLI structure for kubefan using `clap`. Every batch command
//! runs against `--context` names when given, otherwise against the
//! persisted selection (or the active context when fewer than two are
//! selected).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::GroupVersionResource;

/// Fan out Kubernetes reads and kubectl commands across many contexts
#[derive(Parser, Debug)]
#[command(name = "kubefan")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file [default: ~/.kubefan/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the kubefan CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a resource kind across contexts as one merged table
    List(ListArgs),

    /// Show the server version of every context
    Versions(ContextArgs),

    /// Run a kubectl command against every context
    Exec(ExecArgs),

    /// Show one object from a merged listing by its row ID
    Describe(DescribeArgs),

    /// Manage the selected contexts
    #[command(subcommand)]
    Contexts(ContextsCommand),

    /// Keep a merged listing refreshed while the cluster is reachable
    Watch(WatchArgs),
}

/// Explicit context selection shared by batch commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Contexts to target (comma-separated); defaults to the selection
    #[arg(long = "context", value_name = "NAME", value_delimiter = ',')]
    pub contexts: Vec<String>,
}

/// Arguments for `kubefan list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource: RESOURCE, VERSION/RESOURCE or GROUP/VERSION/RESOURCE
    pub resource: GroupVersionResource,

    /// Namespace; `all` (default) or `-` lists every namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Label selector, e.g. `app=web`
    #[arg(short = 'l', long = "selector")]
    pub selector: Option<String>,

    #[command(flatten)]
    pub target: ContextArgs,
}

/// Arguments for `kubefan exec`.
#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Concurrent kubectl processes [default: fanout.command_max_parallel]
    #[arg(long)]
    pub max_parallel: Option<usize>,

    #[command(flatten)]
    pub target: ContextArgs,

    /// kubectl arguments; `--context` is injected per context
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "KUBECTL_ARGS"
    )]
    pub args: Vec<String>,
}

/// Arguments for `kubefan describe`.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Resource: RESOURCE, VERSION/RESOURCE or GROUP/VERSION/RESOURCE
    pub resource: GroupVersionResource,

    /// Row ID from `kubefan list` (`context@@namespace/name`, or a plain path)
    pub id: String,
}

/// Subcommands for `kubefan contexts`.
#[derive(Subcommand, Debug)]
pub enum ContextsCommand {
    /// List known contexts with selection markers
    List,
    /// Add contexts to the selection
    Select(ContextNames),
    /// Remove contexts from the selection
    Deselect(ContextNames),
    /// Flip the selection state of one context
    Toggle(ContextName),
    /// Select every known context
    All,
    /// Clear the selection
    Clear,
}

#[derive(Args, Debug)]
pub struct ContextNames {
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ContextName {
    pub name: String,
}

/// Arguments for `kubefan watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Resource: RESOURCE, VERSION/RESOURCE or GROUP/VERSION/RESOURCE
    pub resource: GroupVersionResource,

    /// Namespace; `all` (default) or `-` lists every namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Label selector, e.g. `app=web`
    #[arg(short = 'l', long = "selector")]
    pub selector: Option<String>,

    /// Seconds between refreshes
    #[arg(long, default_value_t = 5)]
    pub interval: u64,

    #[command(flatten)]
    pub target: ContextArgs,
}
