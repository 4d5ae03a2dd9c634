//! Size-bounded, speaker-turn-aligned transcript splitting.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::transcript::{extract_speakers, speaker_turns};
use crate::{RecapError, Result};

/// Approximate characters per token (conservative estimate).
const CHARS_PER_TOKEN: usize = 4;

/// Default max tokens per chunk.
const DEFAULT_MAX_TOKENS: usize = 3000;

/// Default overlap tokens between chunks for context continuity.
const DEFAULT_OVERLAP_TOKENS: usize = 200;

/// Floor below which a chunk is merged into its predecessor.
const MIN_CHUNK_CHARS: usize = 500;

/// Prefix marking overlap text carried over from the previous chunk.
pub const CONTINUITY_MARKER: &str = "[...continued from previous section...]\n";

static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// A contiguous (possibly overlap-augmented) slice of transcript text.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    /// Chunk text, prefixed with the continuity marker for chunks after the
    /// first.
    pub text: String,
    /// Best-effort byte offset into the original text; approximate once
    /// overlap is injected.
    pub start_idx: usize,
    pub end_idx: usize,
    /// Normalized speaker names found within this chunk.
    pub speakers: BTreeSet<String>,
    /// 1-based position within this chunking call.
    pub chunk_number: usize,
    pub total_chunks: usize,
}

/// Splits long transcripts into manageable chunks for processing.
pub struct TranscriptChunker {
    max_chars: usize,
    overlap_chars: usize,
}

impl Default for TranscriptChunker {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_TOKENS * CHARS_PER_TOKEN,
            overlap_chars: DEFAULT_OVERLAP_TOKENS * CHARS_PER_TOKEN,
        }
    }
}

impl TranscriptChunker {
    /// Create a chunker with explicit token budgets.
    pub fn new(max_tokens: usize, overlap_tokens: usize) -> Result<Self> {
        if max_tokens == 0 {
            return Err(RecapError::Config(
                "max_tokens must be positive".to_string(),
            ));
        }
        Ok(Self {
            max_chars: max_tokens * CHARS_PER_TOKEN,
            overlap_chars: overlap_tokens * CHARS_PER_TOKEN,
        })
    }

    /// Split a transcript into chunks.
    pub fn chunk(&self, transcript: &str) -> Vec<Chunk> {
        let transcript = transcript.trim();

        if transcript.len() <= self.max_chars {
            return vec![Chunk {
                text: transcript.to_string(),
                start_idx: 0,
                end_idx: transcript.len(),
                speakers: extract_speakers(transcript).into_iter().collect(),
                chunk_number: 1,
                total_chunks: 1,
            }];
        }

        let speaker_chunks = self.split_by_speakers(transcript);

        // Re-split anything still over budget by paragraphs (and within
        // those, by sentences).
        let mut sized_chunks = Vec::new();
        for chunk_text in speaker_chunks {
            if chunk_text.len() > self.max_chars {
                sized_chunks.extend(self.split_by_paragraphs(&chunk_text));
            } else {
                sized_chunks.push(chunk_text);
            }
        }

        let merged = self.merge_small_chunks(sized_chunks);
        let overlapped = self.add_overlap(merged);
        self.build_chunk_objects(overlapped, transcript)
    }

    /// Group consecutive speaker turns greedily under the character budget.
    fn split_by_speakers(&self, transcript: &str) -> Vec<String> {
        let turns = speaker_turns(transcript);

        if turns.is_empty() {
            // No speaker markers anywhere; fall back to paragraph splitting.
            return self.split_by_paragraphs(transcript);
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for turn in &turns {
            let turn_text = turn.text(transcript);

            if current.len() + turn_text.len() > self.max_chars {
                if !current.is_empty() {
                    chunks.push(current.trim().to_string());
                }
                current = turn_text.to_string();
            } else {
                current.push_str(turn_text);
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
    }

    fn split_by_paragraphs(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for paragraph in PARAGRAPH_RE.split(text) {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }

            if current.len() + paragraph.len() + 2 > self.max_chars {
                if !current.is_empty() {
                    chunks.push(current.trim().to_string());
                    current = String::new();
                }
                if paragraph.len() > self.max_chars {
                    let mut sentence_chunks = self.split_by_sentences(paragraph);
                    if let Some(last) = sentence_chunks.pop() {
                        chunks.extend(sentence_chunks);
                        current = last;
                    }
                } else {
                    current = paragraph.to_string();
                }
            } else if current.is_empty() {
                current = paragraph.to_string();
            } else {
                current.push_str("\n\n");
                current.push_str(paragraph);
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
    }

    /// Last resort: accumulate sentences under the budget. A single sentence
    /// over budget is kept whole.
    fn split_by_sentences(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for sentence in split_sentences(text) {
            if current.len() + sentence.len() + 1 > self.max_chars {
                if !current.is_empty() {
                    chunks.push(current.trim().to_string());
                }
                current = sentence.to_string();
            } else if current.is_empty() {
                current = sentence.to_string();
            } else {
                current.push(' ');
                current.push_str(sentence);
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
    }

    /// Merge chunks under the size floor into their predecessor, as long as
    /// the merge stays within budget.
    fn merge_small_chunks(&self, chunks: Vec<String>) -> Vec<String> {
        if chunks.len() <= 1 {
            return chunks;
        }

        let mut merged: Vec<String> = Vec::new();
        let mut iter = chunks.into_iter().peekable();

        while let Some(mut current) = iter.next() {
            while current.len() < MIN_CHUNK_CHARS {
                match iter.peek() {
                    Some(next) if current.len() + next.len() + 2 <= self.max_chars => {
                        current.push_str("\n\n");
                        current.push_str(&iter.next().unwrap());
                    }
                    _ => break,
                }
            }
            merged.push(current);
        }

        merged
    }

    /// Prepend a continuity marker plus the previous chunk's tail to every
    /// chunk after the first.
    fn add_overlap(&self, chunks: Vec<String>) -> Vec<String> {
        if chunks.len() <= 1 {
            return chunks;
        }

        let mut overlapped = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                overlapped.push(chunk.clone());
                continue;
            }

            let overlap = self.overlap_suffix(&chunks[i - 1]);
            if overlap.is_empty() {
                overlapped.push(chunk.clone());
            } else {
                overlapped.push(format!("{}{}\n\n{}", CONTINUITY_MARKER, overlap, chunk));
            }
        }

        overlapped
    }

    /// Tail of `text` sized to the overlap budget, snapped forward to the
    /// nearest speaker turn, then paragraph break, else used verbatim.
    fn overlap_suffix<'a>(&self, text: &'a str) -> &'a str {
        if self.overlap_chars == 0 {
            return "";
        }
        if text.len() <= self.overlap_chars {
            return text;
        }

        let suffix = tail_chars(text, self.overlap_chars);

        if let Some(turn) = speaker_turns(suffix).first() {
            return &suffix[turn.start..];
        }

        if let Some(pos) = suffix.find("\n\n") {
            return &suffix[pos + 2..];
        }

        suffix
    }

    fn build_chunk_objects(&self, chunk_texts: Vec<String>, original: &str) -> Vec<Chunk> {
        let total = chunk_texts.len();

        chunk_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                // Positions are approximate once overlap is injected; locate
                // the chunk by its first ~100 characters.
                let clean = text.replace(CONTINUITY_MARKER, "");
                let needle = head_chars(&clean, 100);
                let start_idx = original.find(needle).unwrap_or(0);
                let end_idx = (start_idx + text.len()).min(original.len());

                Chunk {
                    speakers: extract_speakers(&text).into_iter().collect(),
                    start_idx,
                    end_idx,
                    chunk_number: i + 1,
                    total_chunks: total,
                    text,
                }
            })
            .collect()
    }
}

/// Estimate how many chunks a transcript will produce, without running the
/// full algorithm. Used for progress prediction.
pub fn estimate_chunks(transcript: &str, max_tokens: usize) -> usize {
    let max_chars = max_tokens.max(1) * CHARS_PER_TOKEN;
    transcript.len().div_ceil(max_chars).max(1)
}

/// Split on sentence-ending punctuation followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last = 0;

    for m in SENTENCE_END_RE.find_iter(text) {
        // The punctuation class is single-byte, so +1 stays on a boundary.
        let end = m.start() + 1;
        let sentence = text[last..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        last = m.end();
    }

    let rest = text[last..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Last `max_chars` characters of `text`, on a char boundary.
fn tail_chars(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    let skip = count - max_chars;
    let offset = text
        .char_indices()
        .nth(skip)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &text[offset..]
}

/// First `max_chars` characters of `text`, on a char boundary.
fn head_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
