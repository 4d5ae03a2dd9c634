//! Transcript normalization and shared speaker-turn tokenization

mod speakers;
mod validate;
mod vtt;

pub use speakers::{extract_speakers, speaker_turns, SpeakerTurn};
pub use validate::validate_transcript;
pub use vtt::{format_duration, is_caption_format, normalize, parse_timestamp};

/// Preprocess raw input, auto-detecting and normalizing caption formats.
///
/// Returns the clean transcript text and a derived duration string when the
/// input carried usable cue timestamps.
pub fn preprocess(text: &str) -> (String, Option<String>) {
    if is_caption_format(text) {
        normalize(text)
    } else {
        (text.trim().to_string(), None)
    }
}
