//! CLI command implementations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::chunking::TranscriptChunker;
use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::detect::{detect, DetectOptions, MeetingType};
use crate::llm::build_backend;
use crate::pipeline::{estimate_processing, MeetingPipeline};
use crate::report::render_markdown;
use crate::transcript::{preprocess, validate_transcript};

/// Read and normalize a transcript file. Returns the cleaned text and the
/// duration string when the file carried caption timestamps.
fn load_transcript(path: &Path) -> Result<(String, Option<String>)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file: {}", path.display()))?;
    Ok(preprocess(&raw))
}

fn resolve_meeting_type(requested: &str) -> Result<MeetingType> {
    MeetingType::from_str(requested).with_context(|| {
        let valid: Vec<&str> = MeetingType::all().iter().map(|mt| mt.as_str()).collect();
        format!(
            "Unknown meeting type '{}'. Valid types: {}",
            requested,
            valid.join(", ")
        )
    })
}

fn write_result(content: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            eprintln!("Summary written to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Summarize a meeting transcript
#[allow(clippy::too_many_arguments)]
pub async fn summarize(
    settings: &Settings,
    file: &Path,
    title: Option<String>,
    meeting_type: Option<String>,
    force_chunking: bool,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let (transcript, duration) = load_transcript(file)?;
    validate_transcript(&transcript)?;

    let meeting_type = match meeting_type {
        Some(requested) => resolve_meeting_type(&requested)?,
        None => {
            let result = detect(
                &transcript,
                DetectOptions {
                    duration_string: duration.as_deref(),
                    title: title.as_deref(),
                    ..DetectOptions::default()
                },
            );
            eprintln!(
                "Detected meeting type: {} (confidence: {}%)",
                result.meeting_type.display_name(),
                (result.confidence * 100.0) as u32
            );
            if result.needs_confirmation() {
                eprintln!(
                    "Low confidence; pass --type to override if this looks wrong."
                );
            }
            result.meeting_type
        }
    };

    let backend = build_backend(settings)?;
    let pipeline = MeetingPipeline::with_chunking(
        backend,
        settings.chunking.max_tokens,
        settings.chunking.overlap_tokens,
        settings.chunking.chunk_threshold_chars,
    )?;

    let progress = |current: usize, total: usize, message: &str| {
        if total > 0 {
            eprintln!("[{}/{}] {}", current, total, message);
        } else {
            eprintln!("{}", message);
        }
    };

    let result = pipeline
        .process(&transcript, Some(meeting_type), force_chunking, Some(&progress))
        .await?;

    if result.was_chunked {
        eprintln!("Processed {} chunks", result.chunks_processed);
    }

    let rendered = if json {
        serde_json::to_string_pretty(&result.summary)?
    } else {
        render_markdown(&result.summary)
    };
    write_result(&rendered, output)
}

/// Detect the meeting type of a transcript
pub fn detect_command(file: &Path, title: Option<String>, json: bool) -> Result<()> {
    let (transcript, duration) = load_transcript(file)?;
    validate_transcript(&transcript)?;

    let result = detect(
        &transcript,
        DetectOptions {
            duration_string: duration.as_deref(),
            title: title.as_deref(),
            ..DetectOptions::default()
        },
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Meeting type: {} ({})",
        result.meeting_type.display_name(),
        result.meeting_type.as_str()
    );
    println!("Confidence: {}%", (result.confidence * 100.0) as u32);
    if !result.signals.is_empty() {
        println!("Signals:");
        for signal in &result.signals {
            println!("  - {}", signal);
        }
    }
    if result.needs_confirmation() {
        println!();
        println!("{}", result.confirmation_message());
    }

    Ok(())
}

/// Split a transcript into chunks and show the boundaries
pub fn chunk_command(
    settings: &Settings,
    file: &Path,
    max_tokens: Option<usize>,
    overlap_tokens: Option<usize>,
    json: bool,
) -> Result<()> {
    let (transcript, _) = load_transcript(file)?;
    validate_transcript(&transcript)?;

    let chunker = TranscriptChunker::new(
        max_tokens.unwrap_or(settings.chunking.max_tokens),
        overlap_tokens.unwrap_or(settings.chunking.overlap_tokens),
    )?;
    let chunks = chunker.chunk(&transcript);

    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }

    println!("{} chunks", chunks.len());
    for chunk in &chunks {
        let speakers: Vec<&str> = chunk.speakers.iter().map(String::as_str).collect();
        println!();
        println!(
            "--- Chunk {}/{} ({} chars, bytes {}..{})",
            chunk.chunk_number,
            chunk.total_chunks,
            chunk.text.len(),
            chunk.start_idx,
            chunk.end_idx
        );
        if !speakers.is_empty() {
            println!("Speakers: {}", speakers.join(", "));
        }
        let preview: String = chunk.text.chars().take(120).collect();
        println!("{}...", preview.trim_end());
    }

    Ok(())
}

/// Estimate processing cost for a transcript
pub fn estimate_command(settings: &Settings, file: &Path) -> Result<()> {
    let (transcript, _) = load_transcript(file)?;

    let estimate = estimate_processing(
        &transcript,
        settings.chunking.max_tokens,
        settings.chunking.chunk_threshold_chars,
    );

    println!("Characters:         {}", estimate.character_count);
    println!("Estimated tokens:   {}", estimate.estimated_tokens);
    println!("Estimated chunks:   {}", estimate.estimated_chunks);
    println!(
        "Chunking:           {}",
        if estimate.will_use_chunking { "yes" } else { "no" }
    );
    println!("Estimated API calls: {}", estimate.estimated_api_calls);

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
