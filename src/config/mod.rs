#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{BloodBankError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_ASSISTANT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ASSISTANT_MODEL: &str = "gemini-2.5-flash";

/// Client configuration, created once at start-up and handed to every controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    /// Falls back to `GEMINI_API_KEY`, then `API_KEY`.
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ASSISTANT_ENDPOINT.to_string(),
            model: DEFAULT_ASSISTANT_MODEL.to_string(),
            api_key: None,
            temperature: 0.7,
            timeout_seconds: 60,
        }
    }
}

impl AssistantConfig {
    pub fn resolved_api_key(&self) -> String {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// A group with fewer usable units than this is flagged as critically low.
    pub critical_low_threshold: u32,
    pub expiry_warning_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            critical_low_threshold: 5,
            expiry_warning_days: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub verbose: bool,
}

impl ClientConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    pub fn assistant_timeout(&self) -> Duration {
        Duration::from_secs(self.assistant.timeout_seconds)
    }

    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_positive_number("api.timeout_seconds", self.api.timeout_seconds, 1)?;
        validate_url("assistant.endpoint", &self.assistant.endpoint)?;
        validate_positive_number("assistant.timeout_seconds", self.assistant.timeout_seconds, 1)?;

        if self.assistant.model.trim().is_empty() {
            return Err(BloodBankError::InvalidConfigValueError {
                field: "assistant.model".to_string(),
                value: self.assistant.model.clone(),
                reason: "Model name cannot be empty".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            return Err(BloodBankError::InvalidConfigValueError {
                field: "assistant.temperature".to_string(),
                value: self.assistant.temperature.to_string(),
                reason: "Value must be between 0 and 2".to_string(),
            });
        }

        Ok(())
    }
}
