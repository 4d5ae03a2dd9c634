//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Transcript chunking settings
    #[serde(default)]
    pub chunking: ChunkingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (langbase)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (overridable via RECAP_LANGBASE_API_KEY)
    #[serde(default)]
    pub api_key: String,

    /// Langbase pipe to run
    #[serde(default = "default_pipe_name")]
    pub pipe_name: String,

    /// Model name forwarded to the pipe
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingSettings {
    /// Target chunk size in estimated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Overlap carried between consecutive chunks, in estimated tokens
    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,

    /// Transcripts at or below this many characters skip chunking
    #[serde(default = "default_chunk_threshold_chars")]
    pub chunk_threshold_chars: usize,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "langbase".to_string()
}

fn default_pipe_name() -> String {
    "meeting-summary".to_string()
}

fn default_llm_model() -> String {
    "openai:gpt-4o".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_tokens() -> usize {
    2000
}

fn default_overlap_tokens() -> usize {
    150
}

fn default_chunk_threshold_chars() -> usize {
    8000
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            pipe_name: default_pipe_name(),
            model: default_llm_model(),
            endpoint: String::new(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap_tokens(),
            chunk_threshold_chars: default_chunk_threshold_chars(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            llm: LlmSettings::default(),
            chunking: ChunkingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("RECAP_LANGBASE_API_KEY") {
                if !key.trim().is_empty() {
                    self.llm.api_key = key;
                }
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "recap", "recap")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_langbase() {
        let settings = Settings::default();
        assert_eq!(settings.llm.provider, "langbase");
        assert_eq!(settings.llm.model, "openai:gpt-4o");
        assert_eq!(settings.chunking.max_tokens, 2000);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let settings: Settings = toml::from_str(
            "[llm]\npipe_name = \"weekly-sync\"\n",
        )
        .unwrap();
        assert_eq!(settings.llm.pipe_name, "weekly-sync");
        assert_eq!(settings.llm.provider, "langbase");
        assert_eq!(settings.chunking.chunk_threshold_chars, 8000);
    }

    #[test]
    fn default_config_round_trips() {
        let content = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed: Settings = toml::from_str(&content).unwrap();
        assert_eq!(parsed.llm.timeout_secs, 120);
        assert_eq!(parsed.chunking.overlap_tokens, 150);
    }
}
