// src/cli.rs
use crate::core::ConfigManager;
use crate::linkedin::{save_profile, LinkedInScraper};
use crate::logging::Verbosity;
use crate::web::start_web_server;
use crate::workflow::{Console, Workflow};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

const DEFAULT_PORT: u16 = 8000;

#[derive(Parser)]
#[command(name = "prospector")]
#[command(about = "Research pipeline: web and LinkedIn search, analysis and reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline for a natural-language request
    Run {
        /// Natural language input describing the task
        #[arg(short, long)]
        input: String,
        /// Maximum number of results to collect (defaults to the count named in the input, else 10)
        #[arg(short, long)]
        max_results: Option<usize>,
        /// Show step details
        #[arg(short, long)]
        verbose: bool,
        /// Suppress all output except errors
        #[arg(short, long)]
        quiet: bool,
        /// Also write the final report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Scrape a single LinkedIn profile and save it as JSON
    Scrape { url: String },
    /// Serve the HTTP job API
    Serve {
        /// Falls back to ROCKET_PORT, then 8000
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        match &self.command {
            Command::Run { quiet, verbose, .. } => Verbosity::from_flags(*quiet, *verbose),
            _ => Verbosity::Normal,
        }
    }
}

/// Returns the process exit code
pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<i32> {
    match cli.command {
        Command::Run {
            input,
            max_results,
            verbose,
            quiet,
            output,
        } => run_workflow(&config, &input, max_results, verbose, quiet, output).await,
        Command::Scrape { url } => {
            scrape_one(&config, &url).await?;
            Ok(0)
        }
        Command::Serve { port } => {
            let port = match port {
                Some(port) => port,
                None => env_port()?,
            };
            start_web_server(config, port).await?;
            Ok(0)
        }
    }
}

async fn run_workflow(
    config: &ConfigManager,
    input: &str,
    max_results: Option<usize>,
    verbose: bool,
    quiet: bool,
    output: Option<PathBuf>,
) -> Result<i32> {
    let outcome = async {
        let mut workflow = Workflow::new(config, Console::new(quiet, verbose))?;
        let results = workflow.execute(input, max_results).await?;

        if let (Some(path), Some(report)) = (output.as_ref(), results.final_report.as_ref()) {
            tokio::fs::write(path, report)
                .await
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                println!("📄 Report saved to: {}", path.display());
            }
        }
        Ok::<_, anyhow::Error>(())
    }
    .await;

    match outcome {
        Ok(()) => {
            if !quiet {
                println!("\n✅ Workflow completed successfully!");
            }
            Ok(0)
        }
        Err(e) => {
            error!("Workflow failed: {:#}", e);
            if !quiet {
                println!("\n❌ Workflow failed: {:#}", e);
            }
            Ok(1)
        }
    }
}

async fn scrape_one(config: &ConfigManager, url: &str) -> Result<()> {
    let mut scraper = LinkedInScraper::launch(&config.browser).await?;
    let scraped = scraper.scrape_profile(url).await;
    scraper.close().await;
    let profile = scraped?;

    let path = save_profile(&config.environment.output_path, &profile).await?;
    info!("Saved profile for {}", profile.basic.name);

    println!("✅ Scraped profile: {}", profile.basic.name);
    println!("   Headline: {}", profile.basic.headline);
    println!("   Location: {}", profile.basic.location);
    println!("   Experience entries: {}", profile.experience.len());
    println!("   Education entries: {}", profile.education.len());
    println!("   Activity posts: {}", profile.activity_posts.len());
    println!("   Recommendations: {}", profile.recommendations.len());
    println!("📄 Saved to: {}", path.display());
    Ok(())
}

fn env_port() -> Result<u16> {
    match std::env::var("ROCKET_PORT") {
        Ok(value) => value
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number")),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "prospector", "run", "-i", "rust developers", "-m", "5", "-q", "-o", "out.md",
        ])
        .unwrap();

        assert_eq!(cli.verbosity(), Verbosity::Quiet);
        match cli.command {
            Command::Run {
                input,
                max_results,
                output,
                ..
            } => {
                assert_eq!(input, "rust developers");
                assert_eq!(max_results, Some(5));
                assert_eq!(output, Some(PathBuf::from("out.md")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn run_requires_input() {
        assert!(Cli::try_parse_from(["prospector", "run"]).is_err());
    }

    #[test]
    fn serve_port_is_optional() {
        let cli = Cli::try_parse_from(["prospector", "serve", "--port", "9001"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: Some(9001) }));
        let cli = Cli::try_parse_from(["prospector", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: None }));
    }
}
