use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::Settings;
use crate::detect::MeetingType;
use crate::llm::client::LlmBackend;
use crate::llm::prompts;
use crate::llm::repair::parse_llm_json;
use crate::{RecapError, Result};

const DEFAULT_LANGBASE_ENDPOINT: &str = "https://api.langbase.com/v1/pipes/run";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_SECS: u64 = 2;
const MAX_OUTPUT_TOKENS: u32 = 4000;

/// Client for the Langbase pipes REST API.
pub struct LangbaseClient {
    http: Client,
    api_key: String,
    pipe_name: String,
    model: String,
    endpoint: String,
    temperature: f64,
}

impl LangbaseClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(RecapError::Config(
                "Langbase API key is missing. Set llm.api_key in config or RECAP_LANGBASE_API_KEY."
                    .to_string(),
            ));
        }

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_LANGBASE_ENDPOINT.to_string()
        } else {
            settings.llm.endpoint.trim().trim_end_matches('/').to_string()
        };

        let timeout = if settings.llm.timeout_secs > 0 {
            settings.llm.timeout_secs
        } else {
            DEFAULT_TIMEOUT_SECS
        };

        Ok(Self {
            http: Client::builder()
                .timeout(Duration::from_secs(timeout))
                .build()
                .map_err(|e| RecapError::Config(format!("Failed to build HTTP client: {}", e)))?,
            api_key,
            pipe_name: settings.llm.pipe_name.clone(),
            model: settings.llm.model.clone(),
            endpoint,
            temperature: settings.llm.temperature,
        })
    }

    /// Run one pipe call with bounded retries for transient failures.
    async fn run_pipe(&self, system_prompt: &str, user_text: &str) -> Result<Value> {
        let body = PipeRequest {
            name: &self.pipe_name,
            messages: vec![
                PipeMessage {
                    role: "system",
                    content: system_prompt,
                },
                PipeMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            model: &self.model,
            stream: false,
            temperature: self.temperature,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let mut last_error = String::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_secs(RETRY_DELAY_SECS * u64::from(attempt));
                tracing::debug!("retrying backend call in {:?} (attempt {})", delay, attempt + 1);
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .http
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(err) if err.is_timeout() || err.is_connect() => {
                    last_error = err.to_string();
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let status = response.status();
            if status.is_success() {
                let payload: Value = response.json().await?;
                let content = extract_content(&payload).ok_or(RecapError::EmptyResponse)?;
                return parse_llm_json(&content);
            }

            let message = extract_error_message(response).await;
            if is_retryable(status) {
                tracing::warn!("retryable backend error ({}): {}", status, message);
                last_error = format!("API error ({}): {}", status, message);
                continue;
            }

            return Err(RecapError::Backend(format!(
                "API error ({}): {}",
                status, message
            )));
        }

        Err(RecapError::Backend(format!(
            "Failed after {} retries. Last error: {}",
            MAX_RETRIES, last_error
        )))
    }
}

#[async_trait]
impl LlmBackend for LangbaseClient {
    async fn analyze_transcript(
        &self,
        transcript: &str,
        meeting_type: Option<MeetingType>,
    ) -> Result<Value> {
        self.run_pipe(&prompts::summary_prompt(meeting_type), transcript)
            .await
    }

    async fn analyze_chunk(
        &self,
        chunk_text: &str,
        chunk_number: usize,
        total_chunks: usize,
        meeting_type: Option<MeetingType>,
    ) -> Result<Value> {
        self.run_pipe(
            &prompts::chunk_prompt(chunk_number, total_chunks, meeting_type),
            chunk_text,
        )
        .await
    }

    async fn merge_chunks(
        &self,
        chunk_results: &[Value],
        meeting_type: Option<MeetingType>,
    ) -> Result<Value> {
        let mut chunks_text = format!(
            "Merge these {} chunk summaries into a final meeting summary:",
            chunk_results.len()
        );
        for (i, result) in chunk_results.iter().enumerate() {
            chunks_text.push_str(&format!(
                "\n\n=== CHUNK {} OF {} ===\n{}",
                i + 1,
                chunk_results.len(),
                serde_json::to_string_pretty(result)?
            ));
        }

        self.run_pipe(&prompts::merge_prompt(meeting_type), &chunks_text)
            .await
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Extract assistant content from the response, accepting the OpenAI-style
/// shape as well as bare `content`/`completion` fields.
fn extract_content(payload: &Value) -> Option<String> {
    if let Some(content) = payload
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
    {
        if !content.trim().is_empty() {
            return Some(content.to_string());
        }
        return None;
    }

    for field in ["content", "completion"] {
        if let Some(content) = payload.get(field).and_then(Value::as_str) {
            if !content.trim().is_empty() {
                return Some(content.to_string());
            }
        }
    }

    None
}

async fn extract_error_message(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(text) => {
            if let Ok(value) = serde_json::from_str::<Value>(&text) {
                if let Some(message) = value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                {
                    return message.to_string();
                }
            }
            text
        }
        Err(err) => err.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct PipeRequest<'a> {
    name: &'a str,
    messages: Vec<PipeMessage<'a>>,
    model: &'a str,
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct PipeMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_openai_style_content() {
        let payload = json!({
            "choices": [{"message": {"content": "{\"tldr\": \"ok\"}"}}]
        });
        assert_eq!(extract_content(&payload).unwrap(), "{\"tldr\": \"ok\"}");
    }

    #[test]
    fn extracts_bare_content_fields() {
        assert_eq!(
            extract_content(&json!({"content": "direct"})).unwrap(),
            "direct"
        );
        assert_eq!(
            extract_content(&json!({"completion": "done"})).unwrap(),
            "done"
        );
    }

    #[test]
    fn empty_content_is_none() {
        assert!(extract_content(&json!({"choices": [{"message": {"content": "  "}}]})).is_none());
        assert!(extract_content(&json!({"unrelated": 1})).is_none());
    }

    #[test]
    fn retryable_status_classification() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
    }
}
