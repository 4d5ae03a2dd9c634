//! WebVTT-style caption normalization.
//!
//! Turns a caption track into a plain "Speaker: utterance" transcript and
//! derives the elapsed duration from the first and last cue timestamps.

use once_cell::sync::Lazy;
use regex::Regex;

static TIMESTAMP_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}(?::\d{2})?(?:[.,]\d{1,3})?)\s*-->\s*(\d{2}:\d{2}(?::\d{2})?(?:[.,]\d{1,3})?)")
        .unwrap()
});

static TIMESTAMP_ANYWHERE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}:\d{2}(?::\d{2})?(?:[.,]\d{1,3})?\s*-->\s*\d{2}:\d{2}").unwrap());

static CUE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

static VOICE_CUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<v\s+([^>]+)>(.*)$").unwrap());

static SPEAKER_COLON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-zA-Z \t.\-]+):\s*(.*)$").unwrap());

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Check whether the given text looks like a caption-track format.
///
/// True when the text starts with a recognized container header or the first
/// 500 characters contain a cue timestamp range.
pub fn is_caption_format(text: &str) -> bool {
    let text = text.trim();

    if text.to_uppercase().starts_with("WEBVTT") {
        return true;
    }

    let head: String = text.chars().take(500).collect();
    TIMESTAMP_ANYWHERE_RE.is_match(&head)
}

/// Parse a cue timestamp ("00:05:30.500" or "05:30.500") into seconds.
///
/// A comma decimal separator is also accepted. Unparseable input yields 0.
pub fn parse_timestamp(timestamp: &str) -> f64 {
    let normalized = timestamp.replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();

    match parts.as_slice() {
        [hours, minutes, seconds] => {
            let h: f64 = hours.parse().unwrap_or(0.0);
            let m: f64 = minutes.parse().unwrap_or(0.0);
            let s: f64 = seconds.parse().unwrap_or(0.0);
            h * 3600.0 + m * 60.0 + s
        }
        [minutes, seconds] => {
            let m: f64 = minutes.parse().unwrap_or(0.0);
            let s: f64 = seconds.parse().unwrap_or(0.0);
            m * 60.0 + s
        }
        _ => 0.0,
    }
}

/// Format a duration in seconds as a human-readable string, e.g.
/// "1 hour 23 minutes" or "45 minutes".
pub fn format_duration(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;

    match (hours, minutes) {
        (0, 0) => "less than 1 minute".to_string(),
        (0, m) => format!("{} minute{}", m, plural(m)),
        (h, 0) => format!("{} hour{}", h, plural(h)),
        (h, m) => format!("{} hour{} {} minute{}", h, plural(h), m, plural(m)),
    }
}

fn plural(n: u64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

/// Normalize caption content into a clean "Speaker: utterance" transcript.
///
/// Consecutive cues from the same speaker are joined with spaces; a speaker
/// change flushes the accumulated utterance as one line. Returns the clean
/// text plus a duration string when cue timestamps were present.
pub fn normalize(content: &str) -> (String, Option<String>) {
    let mut transcript_lines: Vec<String> = Vec::new();
    let mut current_speaker: Option<String> = None;
    let mut current_text: Vec<String> = Vec::new();

    let mut first_timestamp: Option<String> = None;
    let mut last_timestamp: Option<String> = None;

    for raw_line in content.trim().lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }
        let upper = line.to_uppercase();
        if upper.starts_with("WEBVTT") || upper.starts_with("NOTE") || upper.starts_with("STYLE") {
            continue;
        }
        if line.starts_with("::cue") {
            continue;
        }

        if let Some(caps) = TIMESTAMP_LINE_RE.captures(line) {
            if first_timestamp.is_none() {
                first_timestamp = Some(caps[1].to_string());
            }
            last_timestamp = Some(caps[2].to_string());
            continue;
        }

        if CUE_ID_RE.is_match(line) {
            continue;
        }
        if line.starts_with("align:") || line.starts_with("position:") {
            continue;
        }

        if let Some(caps) = VOICE_CUE_RE.captures(line) {
            let speaker = caps[1].trim().to_string();
            let text = caps[2].replace("</v>", "").trim().to_string();
            push_utterance(
                &mut transcript_lines,
                &mut current_speaker,
                &mut current_text,
                speaker,
                text,
            );
            continue;
        }

        if let Some(caps) = SPEAKER_COLON_RE.captures(line) {
            let speaker = caps[1].trim().to_string();
            let text = caps[2].trim().to_string();
            push_utterance(
                &mut transcript_lines,
                &mut current_speaker,
                &mut current_text,
                speaker,
                text,
            );
            continue;
        }

        // Continuation line for the current speaker, markup stripped.
        let clean = TAG_RE.replace_all(line, "").trim().to_string();
        if !clean.is_empty() {
            current_text.push(clean);
        }
    }

    if let Some(speaker) = current_speaker {
        if !current_text.is_empty() {
            transcript_lines.push(format!("{}: {}", speaker, current_text.join(" ")));
        }
    } else if !current_text.is_empty() {
        // No speaker markers at all: emit one unattributed block.
        transcript_lines.push(current_text.join(" "));
    }

    let duration = match (first_timestamp, last_timestamp) {
        (Some(first), Some(last)) => {
            let elapsed = parse_timestamp(&last) - parse_timestamp(&first);
            if elapsed > 0.0 {
                Some(format_duration(elapsed))
            } else {
                None
            }
        }
        _ => None,
    };

    (transcript_lines.join("\n\n"), duration)
}

fn push_utterance(
    transcript_lines: &mut Vec<String>,
    current_speaker: &mut Option<String>,
    current_text: &mut Vec<String>,
    speaker: String,
    text: String,
) {
    if current_speaker.as_deref() != Some(speaker.as_str()) {
        if let Some(prev) = current_speaker.take() {
            if !current_text.is_empty() {
                transcript_lines.push(format!("{}: {}", prev, current_text.join(" ")));
            }
        }
        *current_speaker = Some(speaker);
        current_text.clear();
        if !text.is_empty() {
            current_text.push(text);
        }
    } else if !text.is_empty() {
        current_text.push(text);
    }
}
