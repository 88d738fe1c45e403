use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClinicFlowError, Result};
use crate::oracle::{Oracle, OraclePrompt};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: Option<f32>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            temperature: None,
        }
    }

    /// Reads `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) and an optional `GEMINI_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| ClinicFlowError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user(text: String) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: Some(text) }],
        }
    }

    fn system(text: String) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: Some(text) }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

impl From<reqwest::Error> for ClinicFlowError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// [`Oracle`] backed by the Gemini `generateContent` endpoint in JSON mode.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Fails with [`ClinicFlowError::MissingApiKey`] if the key is blank.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ClinicFlowError::MissingApiKey);
        }
        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Oracle for GeminiClient {
    async fn generate(&self, prompt: &OraclePrompt) -> Result<Option<Value>> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let payload = GenerateContentRequest {
            contents: vec![Content::user(prompt.user.clone())],
            system_instruction: Content::system(system_instruction(prompt)?),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: self.config.temperature,
            },
        };

        debug!("Calling Gemini model {}", self.config.model);
        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            return Err(ClinicFlowError::Oracle(format!(
                "Gemini API Error (status {}): {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await?;
        extract_output(body)
    }
}

fn system_instruction(prompt: &OraclePrompt) -> Result<String> {
    let schema = serde_json::to_string_pretty(&prompt.output_schema)?;
    Ok(format!(
        "{}\n## OUTPUT FORMAT\nReturn ONLY a JSON object matching this JSON schema:\n```json\n{}\n```",
        prompt.system.trim_end(),
        schema
    ))
}

fn extract_output(body: GenerateContentResponse) -> Result<Option<Value>> {
    if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ClinicFlowError::Oracle(format!(
            "Prompt blocked by Gemini: {}",
            reason
        )));
    }

    let text = body
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(&clean_json_output(&text))
        .map_err(|e| ClinicFlowError::MalformedOracleOutput(e.to_string()))?;
    Ok(Some(value))
}

/// Strips markdown fences or chatter around the outermost JSON object.
fn clean_json_output(raw: &str) -> String {
    if let Some(start) = raw.find('{') {
        if let Some(end) = raw.rfind('}') {
            if end > start {
                return raw[start..=end].to_string();
            }
        }
    }
    raw.trim().to_string()
}
