pub mod config;
pub mod profiles;
pub mod purge;
pub mod rescan;
pub mod submit;
pub mod targets;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use scanbatch_common::config::store::ConfigStore;
use scanbatch_common::config::{ReportType, ScanSpeed};
use scanbatch_common::profile::{ProfileChoice, ScanProfile};
use scanbatch_core::ScannerClient;

#[derive(Parser)]
#[command(name = "scanbatch")]
#[command(version, about = "Batch-submit targets to a web vulnerability scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this configuration file instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Less output; repeat for even less
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add targets and start a scan on each
    #[command(alias = "s")]
    Submit(SubmitArgs),
    /// List the targets registered with the scanner
    #[command(alias = "t")]
    Targets,
    /// Start a new scan on an existing target
    #[command(alias = "r")]
    Rescan {
        /// Target id or address
        target: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Delete every scan and target on the scanner
    Purge {
        /// Delete scans but keep targets
        #[arg(long)]
        scans_only: bool,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the built-in scan profiles
    #[command(alias = "p")]
    Profiles {
        /// Compare the table with the profiles on the scanner
        #[arg(long)]
        remote: bool,
    },
    /// View or edit the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub struct SubmitArgs {
    /// URLs to submit; `-` reads a list from stdin
    pub urls: Vec<String>,
    /// File with one URL per line
    #[arg(short, long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,
    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Built-in scan profile, see `scanbatch profiles`
    #[arg(short, long, default_value = "full", conflicts_with = "profile_id")]
    pub profile: ScanProfile,
    /// Raw profile id, e.g. a custom profile defined on the scanner
    #[arg(long, value_name = "ID")]
    pub profile_id: Option<String>,
}

impl ProfileArgs {
    pub fn choice(&self) -> ProfileChoice {
        match &self.profile_id {
            Some(id) => ProfileChoice::Custom(id.trim().to_string()),
            None => ProfileChoice::Builtin(self.profile),
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Print where the configuration is stored
    Path,
    /// Change one or more settings
    Set(SetArgs),
}

#[derive(Args, Default)]
pub struct SetArgs {
    /// Scanner base URL, e.g. https://scanner.local:3443
    #[arg(long)]
    pub api_url: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    /// Proxy the scanner routes scan traffic through
    #[arg(long, value_name = "ADDR:PORT", conflicts_with = "no_proxy")]
    pub proxy: Option<String>,
    /// Stop routing scan traffic through a proxy
    #[arg(long)]
    pub no_proxy: bool,
    #[arg(long, value_name = "N")]
    pub threads: Option<u32>,
    #[arg(long)]
    pub speed: Option<ScanSpeed>,
    #[arg(long)]
    pub report: Option<ReportType>,
    /// Accept invalid TLS certificates from the scanner
    #[arg(long, value_name = "BOOL")]
    pub insecure: Option<bool>,
    /// Proxy for this tool's own API requests; empty to remove
    #[arg(long, value_name = "URL")]
    pub client_proxy: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Loads and checks the stored configuration, then builds a client from it.
pub fn connect(store: &dyn ConfigStore) -> anyhow::Result<ScannerClient> {
    let config = store
        .load()?
        .context("scanbatch is not configured yet, run `scanbatch config set --api-url URL --api-key KEY`")?;
    config
        .validate()
        .context("configuration is incomplete, fix it with `scanbatch config set`")?;
    Ok(ScannerClient::new(config)?)
}
