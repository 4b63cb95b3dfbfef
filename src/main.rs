use anyhow::Result;
use clap::Parser;
use prospector::cli::{handle_command, Cli};
use prospector::core::ConfigManager;
use prospector::logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load()?;
    logging::init(&config.environment.output_path, cli.verbosity())?;
    config.ensure_directories().await?;

    info!("Environment: {}", config.environment.name);
    info!("Output: {}", config.environment.output_path.display());

    let code = handle_command(cli, config).await?;
    std::process::exit(code);
}
