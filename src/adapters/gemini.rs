//! Gemini `generateContent` client implementing [`ChatCollaborator`].

use crate::config::ClientConfig;
use crate::core::chat::{build_prompt, SYSTEM_INSTRUCTION};
use crate::domain::ports::ChatCollaborator;
use crate::utils::error::{BloodBankError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// 第一個候選回覆的所有文字片段串接；沒有候選時為空字串
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiChatClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiChatClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.assistant_timeout())
            .build()?;
        let assistant = &config.assistant;
        Ok(Self {
            client,
            endpoint: assistant.endpoint.trim_end_matches('/').to_string(),
            model: assistant.model.clone(),
            api_key: assistant.resolved_api_key(),
            temperature: assistant.temperature,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[async_trait]
impl ChatCollaborator for GeminiChatClient {
    async fn send_message(&self, message: &str, history: &[String]) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(BloodBankError::ConfigError {
                message: "no Gemini API key configured".to_string(),
            });
        }

        let prompt = build_prompt(message, history);
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        tracing::debug!("Sending assistant prompt to model {}", self.model);
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Gemini API returned {}", status);
            return Err(BloodBankError::network(
                "generateContent",
                format!("assistant returned status {}", status),
            ));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.text())
    }
}
