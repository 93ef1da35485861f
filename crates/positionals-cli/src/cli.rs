use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "positionals")]
#[command(about = "Positional action table sync and lookup")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/positionals/config.toml)
    #[arg(short, long, global = true, env = "POSITIONALS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache file holding the last fetched table
    #[arg(long, global = true, env = "POSITIONALS_CACHE")]
    pub cache: Option<PathBuf>,

    /// URL of the published CSV export
    #[arg(long, global = true, env = "POSITIONALS_URL")]
    pub url: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Skip the fetch and use the cache file as-is
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Refresh the local table and print a summary
    Sync,
    /// List every positional action
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one action and all of its percent thresholds
    Show {
        /// Action id
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether an action hits at a given percent
    Check {
        /// Action id
        id: u32,
        /// Percent threshold
        percent: u32,
    },
    /// Show cache file and index status
    Status,
}
