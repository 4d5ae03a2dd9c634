//! recap - Meeting transcript summarization with AI-powered insights
//!
//! Entry point for the recap CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recap::cli::{Cli, Commands};
use recap::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            recap::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            match command {
                Commands::Summarize {
                    file,
                    title,
                    meeting_type,
                    force_chunking,
                    json,
                    output,
                } => {
                    recap::cli::commands::summarize(
                        &settings,
                        &file,
                        title,
                        meeting_type,
                        force_chunking,
                        json,
                        output,
                    )
                    .await?;
                }
                Commands::Detect { file, title, json } => {
                    recap::cli::commands::detect_command(&file, title, json)?;
                }
                Commands::Chunk {
                    file,
                    max_tokens,
                    overlap_tokens,
                    json,
                } => {
                    recap::cli::commands::chunk_command(
                        &settings,
                        &file,
                        max_tokens,
                        overlap_tokens,
                        json,
                    )?;
                }
                Commands::Estimate { file } => {
                    recap::cli::commands::estimate_command(&settings, &file)?;
                }
                Commands::Config(config_cmd) => {
                    recap::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
