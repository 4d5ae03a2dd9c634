//! Transcript input validation.

use crate::{RecapError, Result};

/// Minimum transcript length for meaningful analysis.
pub const MIN_CHARS: usize = 100;

/// Maximum transcript length accepted by the pipeline.
pub const MAX_CHARS: usize = 50_000;

/// Validate raw transcript input before any processing is attempted.
pub fn validate_transcript(text: &str) -> Result<()> {
    let text = text.trim();

    if text.is_empty() {
        return Err(RecapError::InvalidTranscript(
            "transcript is empty; provide a meeting transcript".to_string(),
        ));
    }

    let len = text.chars().count();

    if len < MIN_CHARS {
        return Err(RecapError::InvalidTranscript(format!(
            "transcript is too short ({} characters); provide at least {} characters for meaningful analysis",
            len, MIN_CHARS
        )));
    }

    if len > MAX_CHARS {
        return Err(RecapError::InvalidTranscript(format!(
            "transcript is very long ({} characters); trim to under {} characters for best results",
            len, MAX_CHARS
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        assert!(validate_transcript("   \n ").is_err());
    }

    #[test]
    fn rejects_short_input() {
        let err = validate_transcript("too short").unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn rejects_oversized_input() {
        let text = "a".repeat(MAX_CHARS + 1);
        let err = validate_transcript(&text).unwrap_err();
        assert!(err.to_string().contains("very long"));
    }

    #[test]
    fn accepts_reasonable_input() {
        let text = "John: Hello everyone. ".repeat(10);
        assert!(validate_transcript(&text).is_ok());
    }
}
