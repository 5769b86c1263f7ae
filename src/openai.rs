use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{config::AppConfig, models::{ApiKey, ImagePayload}};

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Failed to parse OpenAI response: {0}")]
    Parse(String),
    #[error("OpenAI response contained no completion message")]
    EmptyCompletion,
}

/// One chat-completion call: a system instruction, user text, optional images.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub api_key: ApiKey,
    pub system: String,
    pub text: String,
    pub images: Vec<ImagePayload>,
    pub max_tokens: u32,
}

/// Anything that can turn a [`CompletionRequest`] into completion text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, OpenAiError>;
}

// Shortens base64 data URLs in a request body so debug logs stay readable.
fn truncate_base64_in_json(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if key == "url" {
                    if let serde_json::Value::String(s) = val {
                        if s.starts_with("data:") && s.len() > 100 {
                            *val = serde_json::Value::String(format!("{}...[truncated {} chars]", &s[..50], s.len() - 50));
                        }
                    }
                } else {
                    truncate_base64_in_json(val);
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for val in arr.iter_mut() {
                truncate_base64_in_json(val);
            }
        }
        _ => {}
    }
}

pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Result<Self, OpenAiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| OpenAiError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.openai_api_base.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut content = vec![json!({"type": "text", "text": request.text})];
        content.extend(request.images.iter().map(|img| {
            json!({
                "type": "image_url",
                "image_url": {"url": img.data_url()}
            })
        }));

        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": content}
            ],
            "max_tokens": request.max_tokens
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, OpenAiError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.request_body(&request);

        info!(
            "🔗 Requesting completion from {} (model={}, images={}, max_tokens={})",
            url, self.model, request.images.len(), request.max_tokens
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            let mut logged = body.clone();
            truncate_base64_in_json(&mut logged);
            debug!("📤 Request body: {}", serde_json::to_string_pretty(&logged).unwrap_or_default());
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(request.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| OpenAiError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let response_text = response
            .text()
            .await
            .map_err(|e| OpenAiError::Http(e.to_string()))?;

        if !status.is_success() {
            error!("❌ OpenAI API error response: {}", response_text);
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                message: api_error_message(&response_text),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| OpenAiError::Parse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|s| s.trim().to_string())
            .ok_or(OpenAiError::EmptyCompletion)?;

        info!("✅ Completion received ({} chars)", text.len());
        Ok(text)
    }
}

// Prefer the provider's `error.message`; otherwise keep the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}
