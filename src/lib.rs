//! recap - A lightweight CLI tool for meeting transcript analysis
//!
//! Takes a raw meeting transcript (plain text or WebVTT), detects the meeting
//! type, splits long transcripts into bounded chunks, and produces a
//! structured summary via an LLM backend.

pub mod chunking;
pub mod cli;
pub mod config;
pub mod detect;
pub mod llm;
pub mod pipeline;
pub mod report;
pub mod transcript;

use thiserror::Error;

/// Main error type for recap
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid transcript: {0}")]
    InvalidTranscript(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Empty response from backend")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RecapError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "recap";
