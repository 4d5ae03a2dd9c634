//! Speaker-turn tokenization shared by the chunker and the type detector.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Speaker attribution at the start of a line, e.g. "John:", "Sarah (PM):",
/// "Dr. Smith:".
static SPEAKER_TURN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([A-Z][a-zA-Z \t.\-]+(?:\([^)]*\))?)\s*:").unwrap()
});

/// Inline voice tag attribution, e.g. "<v John Smith>".
static VOICE_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<v\s+([^>]+)>").unwrap());

/// Parenthetical role suffix, e.g. " (PM)" in "Sarah (PM)".
static ROLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*").unwrap());

/// Header-like words that look like speaker labels but never are.
const NON_NAME_WORDS: &[&str] = &["note", "action", "decision", "summary", "topic", "agenda"];

/// One attributed speaker turn: the span runs from the attribution match to
/// the start of the next one (or end of text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerTurn {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

impl SpeakerTurn {
    /// The turn's text, attribution label included.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Tokenize a transcript into ordered speaker turns.
///
/// Returns an empty vector when no attribution markers exist anywhere.
pub fn speaker_turns(text: &str) -> Vec<SpeakerTurn> {
    let matches: Vec<_> = SPEAKER_TURN_RE.captures_iter(text).collect();

    let mut turns = Vec::with_capacity(matches.len());
    for (i, caps) in matches.iter().enumerate() {
        let whole = caps.get(0).unwrap();
        let name = clean_name(caps.get(1).unwrap().as_str());
        let end = matches
            .get(i + 1)
            .map(|next| next.get(0).unwrap().start())
            .unwrap_or(text.len());
        turns.push(SpeakerTurn {
            name,
            start: whole.start(),
            end,
        });
    }

    turns
}

/// Extract unique speaker names from a transcript.
///
/// Recognizes both "Name:" line attribution and "<v Name>" voice tags.
/// Names are deduplicated with parenthetical roles stripped, and header-like
/// labels ("Note:", "Action:", ...) are filtered out.
pub fn extract_speakers(text: &str) -> Vec<String> {
    let mut names = BTreeSet::new();

    for caps in SPEAKER_TURN_RE.captures_iter(text) {
        let name = clean_name(caps.get(1).unwrap().as_str());
        if is_plausible_name(&name) {
            names.insert(name);
        }
    }

    for caps in VOICE_TAG_RE.captures_iter(text) {
        let name = caps.get(1).unwrap().as_str().trim().to_string();
        if !name.is_empty() {
            names.insert(name);
        }
    }

    names.into_iter().collect()
}

fn clean_name(raw: &str) -> String {
    ROLE_RE.replace_all(raw, "").trim().to_string()
}

fn is_plausible_name(name: &str) -> bool {
    if name.is_empty() || name.len() >= 50 {
        return false;
    }
    let lower = name.to_lowercase();
    !NON_NAME_WORDS.iter().any(|word| lower.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_colon_format_speakers() {
        let transcript = "John: Hello everyone.\nSarah: Hi John, ready to start?\nMike: Yes, let's begin.\n";
        let speakers = extract_speakers(transcript);
        assert_eq!(speakers.len(), 3);
        assert!(speakers.contains(&"John".to_string()));
        assert!(speakers.contains(&"Sarah".to_string()));
        assert!(speakers.contains(&"Mike".to_string()));
    }

    #[test]
    fn extracts_voice_tag_speakers() {
        let transcript = "<v John Smith>Hello everyone.\n<v Sarah Jones>Hi John.\n";
        let speakers = extract_speakers(transcript);
        assert!(speakers.contains(&"John Smith".to_string()));
        assert!(speakers.contains(&"Sarah Jones".to_string()));
    }

    #[test]
    fn filters_header_like_labels() {
        let transcript = "John: Hello.\nNote: This is a note.\nAction Item: Do something.\nSarah: Goodbye.\n";
        let speakers = extract_speakers(transcript);
        assert!(speakers.contains(&"John".to_string()));
        assert!(speakers.contains(&"Sarah".to_string()));
        assert!(!speakers.contains(&"Note".to_string()));
        assert!(!speakers.contains(&"Action Item".to_string()));
    }

    #[test]
    fn strips_parenthetical_roles() {
        let transcript = "Sarah (PM): Let's review the plan.\nDr. Smith: Agreed.\n";
        let speakers = extract_speakers(transcript);
        assert!(speakers.contains(&"Sarah".to_string()));
        assert!(speakers.contains(&"Dr. Smith".to_string()));
    }

    #[test]
    fn turns_cover_text_between_attributions() {
        let transcript = "John: First point.\nSarah: Second point.\n";
        let turns = speaker_turns(transcript);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].name, "John");
        assert!(turns[0].text(transcript).contains("First point."));
        assert_eq!(turns[1].name, "Sarah");
        assert_eq!(turns[1].end, transcript.len());
    }

    #[test]
    fn no_markers_yields_no_turns() {
        assert!(speaker_turns("just some unattributed prose here").is_empty());
    }
}
