//! Google Gemini `generateContent` backend for chronicles.

use super::generator::{GenerationError, GenerationFuture, NarrativeGenerator};
use crate::armory::http::build_http_client_with_timeout;
use crate::config::GeminiConfig;
use crate::error::ChronicleError;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GENERATION_TIMEOUT_SECS: u64 = 60;
const MAX_API_ERROR_CHARS: usize = 200;
pub const TRUNCATION_MARKER: &str = "\n\n[...Chronicle truncated due to length limit.]";

// ── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback", default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason", default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

// ── Outcome interpretation ──────────────────────────────────────────────────

fn truncate_api_error(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= MAX_API_ERROR_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_API_ERROR_CHARS).collect();
    out.push('…');
    out
}

/// Map a decoded response body to text, a block, or a failure.
fn interpret(response: &GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(err) = &response.error {
        return Err(GenerationError::Failed(truncate_api_error(&err.message)));
    }
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        tracing::warn!(reason, "prompt blocked by generator");
        return Err(GenerationError::Blocked(reason.to_string()));
    }

    let Some(candidate) = response.candidates.first() else {
        return Err(GenerationError::Failed("response carried no candidates".into()));
    };
    let finish_reason = candidate.finish_reason.as_deref().unwrap_or("STOP");
    if finish_reason == "SAFETY" {
        tracing::warn!("generation stopped for safety");
        return Err(GenerationError::Blocked("SAFETY".into()));
    }

    let text = candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.iter().find_map(|p| p.text.as_deref()))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GenerationError::Failed("response carried no text".into()))?;

    let mut text = text.to_string();
    if finish_reason == "MAX_TOKENS" {
        tracing::warn!("chronicle truncated at the output token limit");
        text.push_str(TRUNCATION_MARKER);
    } else if finish_reason != "STOP" {
        tracing::warn!(finish_reason, "unexpected finish reason");
    }
    Ok(text)
}

// ── Generator ───────────────────────────────────────────────────────────────

pub struct GeminiNarrator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_output_tokens: u32,
}

impl GeminiNarrator {
    pub fn new(config: &GeminiConfig) -> Result<Self, ChronicleError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ChronicleError::NotConfigured(
                    "Gemini API key not found. Set GEMINI_API_KEY or gemini.api_key in config.toml"
                        .into(),
                )
            })?;

        Ok(Self {
            client: build_http_client_with_timeout(GENERATION_TIMEOUT_SECS),
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url,
            Self::model_name(&self.model)
        )
    }

    async fn call(&self, prompt: &str, temperature: f64) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Failed(format!("could not reach Gemini: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Failed(format!("could not read Gemini response: {e}")))?;

        let Ok(parsed) = serde_json::from_str::<GenerateContentResponse>(&body) else {
            tracing::debug!(%status, body = %body, "non-JSON response from Gemini");
            return Err(GenerationError::Failed(format!(
                "received non-JSON response from Gemini ({status})"
            )));
        };

        if !status.is_success() {
            tracing::warn!(%status, "Gemini API error");
            let message = parsed
                .error
                .map(|e| truncate_api_error(&e.message))
                .unwrap_or_else(|| status.to_string());
            return Err(GenerationError::Failed(format!(
                "Gemini API error ({status}): {message}"
            )));
        }

        interpret(&parsed)
    }
}

impl NarrativeGenerator for GeminiNarrator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate<'a>(&'a self, prompt: &'a str, temperature: f64) -> GenerationFuture<'a> {
        Box::pin(self.call(prompt, temperature))
    }
}
