//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// recap - Meeting transcript summarization with AI-powered insights
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a meeting transcript
    Summarize {
        /// Transcript file (plain text or WebVTT)
        file: PathBuf,

        /// Meeting title, used as a classification hint
        #[arg(short, long)]
        title: Option<String>,

        /// Meeting type (standup, retrospective, sprint_planning, one_on_one,
        /// client, architecture, presentation, general); auto-detected when omitted
        #[arg(short = 'T', long = "type")]
        meeting_type: Option<String>,

        /// Chunk the transcript even when it fits in a single call
        #[arg(long)]
        force_chunking: bool,

        /// Emit the raw summary JSON instead of markdown
        #[arg(long)]
        json: bool,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect the meeting type of a transcript
    Detect {
        /// Transcript file (plain text or WebVTT)
        file: PathBuf,

        /// Meeting title, used as a classification hint
        #[arg(short, long)]
        title: Option<String>,

        /// Emit the detection result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a transcript into chunks and show the boundaries
    Chunk {
        /// Transcript file (plain text or WebVTT)
        file: PathBuf,

        /// Target chunk size in estimated tokens
        #[arg(long)]
        max_tokens: Option<usize>,

        /// Overlap between chunks in estimated tokens
        #[arg(long)]
        overlap_tokens: Option<usize>,

        /// Emit the chunks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate processing cost for a transcript
    Estimate {
        /// Transcript file (plain text or WebVTT)
        file: PathBuf,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
