pub mod discover;
pub mod doctor;
pub mod probe_cmd;
pub mod unsupported_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// meshmap — mesh topology discovery and capability probing.
#[derive(Debug, Parser)]
#[command(name = "meshmap", version, about)]
pub struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = "meshmap.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover reachable nodes starting from the configured candidates.
    Discover {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Re-run discovery on an interval and report newly found nodes.
    Watch {
        /// Seconds between discovery runs.
        #[arg(long, default_value_t = 1800)]
        interval: u64,
    },
    /// Probe one node's feature compatibility.
    Probe {
        /// Node address (IP or hostname).
        address: String,
        /// Override the configured attempt budget.
        #[arg(long)]
        max_retries: Option<u32>,
        /// Suppress the exhaustion warnings.
        #[arg(long)]
        silent: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Inspect or edit the unsupported-feature registry.
    #[command(subcommand)]
    Unsupported(UnsupportedCommand),
    /// Walk the management endpoints of one node and report each.
    Doctor {
        /// Node address (IP or hostname).
        address: String,
    },
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum UnsupportedCommand {
    /// Print the combined built-in + override table.
    List,
    /// Check whether a (feature, model) pair is listed as unsupported.
    Check { feature: String, model: String },
    /// Add a (feature, model) pair to the override layer.
    Add { feature: String, model: String },
}
