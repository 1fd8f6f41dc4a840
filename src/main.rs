//! modelfetch - zipped 3D model asset pipeline
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use modelfetch::cli::{Cli, Commands};
use modelfetch::config::{Config, ConfigManager};
use modelfetch::error::ModelFetchResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, config: &Config) {
    // 0 = warn, 1 = info, 2+ = debug
    let filter = match verbose {
        0 => EnvFilter::new("modelfetch=warn"),
        1 => EnvFilter::new("modelfetch=info"),
        _ => EnvFilter::new("modelfetch=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

async fn run() -> ModelFetchResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load_with_cache_root(cli.cache_root).await?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());
    debug!("Cache root {}", config.cache.root_dir().display());

    match cli.command {
        Commands::Fetch(args) => modelfetch::cli::commands::fetch(args, &config).await,
        Commands::Locate(args) => modelfetch::cli::commands::locate(args, &config).await,
        Commands::Cache(args) => modelfetch::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            modelfetch::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
