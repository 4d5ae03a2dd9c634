//! LLM backend for structured meeting analysis
//!
//! Wraps the Langbase pipes API behind the [`LlmBackend`] trait used by the
//! processing pipeline.

mod client;
mod langbase;
mod prompts;
mod repair;

pub use client::{build_backend, LlmBackend};
pub use langbase::LangbaseClient;
pub use repair::parse_llm_json;
