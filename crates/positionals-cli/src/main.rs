mod cli;
mod commands;
mod settings;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use positionals::{HttpSource, PositionalManager, TracingSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("positionals=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_settings = settings::load(cli.config.as_deref())?;
    let config = settings::resolve(&cli, file_settings);
    info!("Using cache file {}", config.cache_path.display());

    let source = HttpSource::new(config.source_url.clone(), config.timeout);
    let manager = PositionalManager::unloaded(config, source, Arc::new(TracingSink));

    let report = if cli.offline {
        manager.load();
        None
    } else {
        Some(manager.refresh())
    };

    match cli.command {
        Command::Sync => commands::sync::run(&manager, report),
        Command::List { json } => commands::list::run(&manager, json),
        Command::Show { id, json } => commands::show::run(&manager, id, json),
        Command::Check { id, percent } => commands::check::run(&manager, id, percent),
        Command::Status => commands::status::run(&manager),
    }
}
