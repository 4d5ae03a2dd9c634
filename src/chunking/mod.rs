//! Transcript chunking
//!
//! Splits long transcripts into bounded, speaker-turn-aligned chunks with
//! controlled overlap for context continuity.

mod chunker;

pub use chunker::{estimate_chunks, Chunk, TranscriptChunker, CONTINUITY_MARKER};
