use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use strokerisk_core::validation::Shape;
use strokerisk_infrastructure::ConfigService;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "strokerisk")]
#[command(about = "StrokeRisk - stroke risk self-assessment (demo backend)", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, env = "STROKERISK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive session (default)
    Repl,
    /// List hospitals nearest to a location
    Hospitals {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Validate a JSON form file against one of the form schemas
    ValidateProfile {
        /// Form schema to apply
        #[arg(long, default_value = "profile")]
        shape: Shape,
        file: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Write the effective configuration, defaults included, to the config file
        #[arg(long)]
        write_defaults: bool,
    },
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::at_default_location()?,
    };
    let config = config_service.load()?;
    init_tracing(&config.logging.level);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::run(config).await?,
        Commands::Hospitals { lat, lng } => commands::hospitals::run(config, lat, lng).await?,
        Commands::ValidateProfile { shape, file } => commands::validate::run(shape, &file)?,
        Commands::Config { write_defaults } => commands::config::run(&config_service, write_defaults)?,
    }

    Ok(())
}
