//! CLI command definitions.

pub mod events;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{ClientConfig, DEFAULT_BASE_URL};

/// Manage calendar events from the command line.
#[derive(Debug, Parser)]
#[command(name = "calctl", version)]
#[command(about = "Manage calendar events from the command line", long_about = None)]
pub struct Cli {
    /// Calendar API base URL.
    #[arg(long, env = "CALCTL_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// OAuth access token.
    #[arg(long, env = "CALCTL_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub access_token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Skip confirmation for destructive commands.
    #[arg(long, global = true)]
    pub force: bool,

    /// Never prompt; destructive commands then require --force.
    #[arg(long, global = true)]
    pub no_input: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Connection settings from the global flags.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone(), self.access_token.clone())
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Event management.
    Events(events::EventsCommand),
}
