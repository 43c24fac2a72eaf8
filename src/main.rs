//! MZproject CLI - Session State Inspector
//!
//! Command-line interface for the MZproject session state library.

use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use mzproject::cli::{commands, Cli, Commands};
use mzproject::{ProjectConfig, ProjectError};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("MZproject v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => ProjectConfig::load(path).map_err(report)?,
        None => ProjectConfig::default(),
    };
    debug!("Using config: {:?}", config);

    match cli.command {
        Some(cmd) => handle_command(cmd, config),
        None => {
            println!("MZproject v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, config: ProjectConfig) -> anyhow::Result<()> {
    match cmd {
        Commands::Describe {
            files,
            project,
            params,
            values,
        } => commands::describe(config, &files, project.as_deref(), &params, &values),
        Commands::Name { path } => commands::name(config, &path),
    }
}

fn report(err: ProjectError) -> anyhow::Error {
    match err.recovery_suggestion() {
        Some(hint) => anyhow::Error::new(err).context(hint),
        None => err.into(),
    }
}
