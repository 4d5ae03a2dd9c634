//! Transcript processing pipeline
//!
//! Orchestrates chunking, per-chunk analysis, and hierarchical merging so
//! that long transcripts fit within model context limits.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::chunking::{estimate_chunks, TranscriptChunker};
use crate::detect::MeetingType;
use crate::llm::LlmBackend;
use crate::Result;

/// Default threshold above which transcripts are processed in chunks (~2000 tokens).
pub const CHUNK_THRESHOLD_CHARS: usize = 8000;

const DEFAULT_MAX_TOKENS_PER_CHUNK: usize = 2000;
const DEFAULT_OVERLAP_TOKENS: usize = 150;

/// Progress callback: (current_step, total_steps, status_message).
/// `total_steps` is 0 while the step count is not yet known.
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize, &str) + Send + Sync);

/// Result of pipeline processing.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub summary: Value,
    pub chunks_processed: usize,
    pub was_chunked: bool,
    /// Individual chunk results, kept for debugging.
    pub chunk_details: Vec<Value>,
}

/// Processing requirements estimate for a transcript.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingEstimate {
    pub character_count: usize,
    pub estimated_tokens: usize,
    pub estimated_chunks: usize,
    pub will_use_chunking: bool,
    pub estimated_api_calls: usize,
}

/// Orchestrates the processing of meeting transcripts.
pub struct MeetingPipeline {
    backend: Box<dyn LlmBackend>,
    chunker: TranscriptChunker,
    max_tokens_per_chunk: usize,
    chunk_threshold_chars: usize,
}

impl MeetingPipeline {
    pub fn new(backend: Box<dyn LlmBackend>) -> Result<Self> {
        Self::with_chunking(
            backend,
            DEFAULT_MAX_TOKENS_PER_CHUNK,
            DEFAULT_OVERLAP_TOKENS,
            CHUNK_THRESHOLD_CHARS,
        )
    }

    pub fn with_chunking(
        backend: Box<dyn LlmBackend>,
        max_tokens_per_chunk: usize,
        overlap_tokens: usize,
        chunk_threshold_chars: usize,
    ) -> Result<Self> {
        Ok(Self {
            backend,
            chunker: TranscriptChunker::new(max_tokens_per_chunk, overlap_tokens)?,
            max_tokens_per_chunk,
            chunk_threshold_chars,
        })
    }

    /// Process a meeting transcript into a structured summary.
    pub async fn process(
        &self,
        transcript: &str,
        meeting_type: Option<MeetingType>,
        force_chunking: bool,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<ProcessingResult> {
        let transcript = transcript.trim();

        let needs_chunking = force_chunking || transcript.len() > self.chunk_threshold_chars;

        if !needs_chunking {
            if let Some(cb) = progress {
                cb(0, 1, "Analyzing transcript...");
            }

            let summary = self.backend.analyze_transcript(transcript, meeting_type).await?;

            if let Some(cb) = progress {
                cb(1, 1, "Complete!");
            }

            return Ok(ProcessingResult {
                summary,
                chunks_processed: 1,
                was_chunked: false,
                chunk_details: Vec::new(),
            });
        }

        self.process_chunked(transcript, meeting_type, progress).await
    }

    async fn process_chunked(
        &self,
        transcript: &str,
        meeting_type: Option<MeetingType>,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<ProcessingResult> {
        if let Some(cb) = progress {
            cb(0, 0, "Splitting transcript into chunks...");
        }

        let chunks = self.chunker.chunk(transcript);
        let total_steps = chunks.len() + 1;

        info!(chunks = chunks.len(), "processing transcript in chunks");

        if let Some(cb) = progress {
            cb(0, total_steps, &format!("Processing {} chunks...", chunks.len()));
        }

        let mut chunk_results = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            if let Some(cb) = progress {
                cb(
                    chunk.chunk_number,
                    total_steps,
                    &format!("Analyzing chunk {}/{}...", chunk.chunk_number, chunk.total_chunks),
                );
            }

            let result = self
                .backend
                .analyze_chunk(&chunk.text, chunk.chunk_number, chunk.total_chunks, meeting_type)
                .await?;
            chunk_results.push(result);
        }

        if let Some(cb) = progress {
            cb(chunks.len(), total_steps, "Merging summaries...");
        }

        let final_summary = if chunk_results.len() == 1 {
            debug!("single chunk, reshaping locally instead of merging");
            reshape_single_chunk(&chunk_results[0])
        } else {
            self.backend.merge_chunks(&chunk_results, meeting_type).await?
        };

        if let Some(cb) = progress {
            cb(total_steps, total_steps, "Complete!");
        }

        Ok(ProcessingResult {
            summary: final_summary,
            chunks_processed: chunks.len(),
            was_chunked: true,
            chunk_details: chunk_results,
        })
    }

    /// Estimate processing requirements without making any API calls.
    pub fn estimate(&self, transcript: &str) -> ProcessingEstimate {
        estimate_processing(
            transcript,
            self.max_tokens_per_chunk,
            self.chunk_threshold_chars,
        )
    }
}

/// Estimate processing requirements for a transcript.
pub fn estimate_processing(
    transcript: &str,
    max_tokens_per_chunk: usize,
    chunk_threshold_chars: usize,
) -> ProcessingEstimate {
    let character_count = transcript.len();
    let estimated_chunks = estimate_chunks(transcript, max_tokens_per_chunk);
    let will_use_chunking = character_count > chunk_threshold_chars;

    ProcessingEstimate {
        character_count,
        estimated_tokens: character_count / 4,
        estimated_chunks,
        will_use_chunking,
        estimated_api_calls: if estimated_chunks > 1 {
            estimated_chunks + 1
        } else {
            estimated_chunks
        },
    }
}

/// Convert a single chunk result to the final summary shape.
///
/// With one chunk there is nothing to merge, but the chunk response uses a
/// different schema than the final summary.
fn reshape_single_chunk(chunk_result: &Value) -> Value {
    let topics = chunk_result
        .get("topics")
        .cloned()
        .unwrap_or_else(|| json!([]));

    let key_topics: Vec<Value> = topics
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|t| t.get("name").cloned().unwrap_or_else(|| json!("")))
                .collect()
        })
        .unwrap_or_default();

    let attendees: Vec<Value> = chunk_result
        .get("speakers")
        .and_then(Value::as_array)
        .map(|speakers| {
            speakers
                .iter()
                .map(|speaker| {
                    let contributions = speaker
                        .get("key_contributions")
                        .and_then(Value::as_array)
                        .map(|items| {
                            items
                                .iter()
                                .filter_map(Value::as_str)
                                .collect::<Vec<_>>()
                                .join(", ")
                        })
                        .unwrap_or_default();
                    json!({
                        "name": speaker.get("name").cloned().unwrap_or_else(|| json!("")),
                        "role": speaker.get("role").cloned().unwrap_or(Value::Null),
                        "contribution_summary": contributions,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let field = |name: &str| chunk_result.get(name).cloned().unwrap_or_else(|| json!([]));

    json!({
        "tldr": chunk_result.get("chunk_summary").cloned().unwrap_or_else(|| json!("")),
        "attendees": attendees,
        "duration_estimate": "Unable to estimate from single segment",
        "topics": topics,
        "key_topics": key_topics,
        "sentiment": chunk_result.get("sentiment").cloned().unwrap_or_else(|| json!({})),
        "action_items": field("action_items"),
        "decisions": field("decisions"),
        "open_questions": field("open_questions"),
        "next_steps": field("follow_ups_mentioned"),
        "notable_quotes": field("key_quotes"),
    })
}
