use async_trait::async_trait;
use serde_json::Value;

use crate::config::Settings;
use crate::detect::MeetingType;
use crate::llm::langbase::LangbaseClient;
use crate::{RecapError, Result};

/// Summarization backend capability consumed by the pipeline.
///
/// Every call returns a parsed structured object; malformed or truncated
/// responses surface as typed failures rather than partial data.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Analyze a whole transcript in one call.
    async fn analyze_transcript(
        &self,
        transcript: &str,
        meeting_type: Option<MeetingType>,
    ) -> Result<Value>;

    /// Analyze a single chunk of a longer transcript.
    async fn analyze_chunk(
        &self,
        chunk_text: &str,
        chunk_number: usize,
        total_chunks: usize,
        meeting_type: Option<MeetingType>,
    ) -> Result<Value>;

    /// Merge per-chunk analysis results into a final summary.
    async fn merge_chunks(
        &self,
        chunk_results: &[Value],
        meeting_type: Option<MeetingType>,
    ) -> Result<Value>;
}

/// Build an LLM backend from runtime settings.
pub fn build_backend(settings: &Settings) -> Result<Box<dyn LlmBackend>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "langbase" => Ok(Box::new(LangbaseClient::from_settings(settings)?)),
        other => Err(RecapError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: langbase",
            other
        ))),
    }
}
