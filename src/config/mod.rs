//! Configuration management

mod settings;

pub use settings::{ChunkingSettings, GeneralSettings, LlmSettings, Settings};
