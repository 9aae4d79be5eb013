use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::application::ports::{ContentExtractor, ContentExtractorError, Extraction};

pub const DEFAULT_PROMPT: &str = "OCR:";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Content extraction through an OpenAI-compatible chat completions endpoint
/// serving PaddleOCR-VL.
pub struct PaddleVlAdapter {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    prompt: String,
    max_tokens: u32,
}

impl PaddleVlAdapter {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn request_body(&self, png_bytes: &[u8]) -> Value {
        let b64 = general_purpose::STANDARD.encode(png_bytes);
        let data_uri = format!("data:image/png;base64,{b64}");

        serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image_url",
                            "image_url": { "url": data_uri }
                        },
                        {
                            "type": "text",
                            "text": self.prompt
                        }
                    ]
                }
            ],
            "max_tokens": self.max_tokens,
            "temperature": 0.0,
            "stream": false
        })
    }
}

#[async_trait]
impl ContentExtractor for PaddleVlAdapter {
    #[tracing::instrument(skip(self, image), fields(bytes = image.len(), model = %self.model))]
    async fn extract(&self, image: &[u8]) -> Result<Extraction, ContentExtractorError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut request = self.client.post(&url).json(&self.request_body(image));
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request.send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ContentExtractorError::Status { status, body });
        }

        let raw_bytes = response.bytes().await.map_err(classify)?;

        parse_completion(&raw_bytes).inspect_err(|_| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse extraction response"
            );
        })
    }
}

fn classify(error: reqwest::Error) -> ContentExtractorError {
    if error.is_timeout() {
        ContentExtractorError::Timeout(error.to_string())
    } else {
        ContentExtractorError::Connection(error.to_string())
    }
}

/// Reads a chat completion body into an [`Extraction`]: the first choice is
/// the text; model, id, finish reason and token usage become metadata.
pub fn parse_completion(raw: &[u8]) -> Result<Extraction, ContentExtractorError> {
    let completion: ChatCompletion = serde_json::from_slice(raw)
        .map_err(|e| ContentExtractorError::InvalidResponse(e.to_string()))?;

    let choice = completion.choices.into_iter().next().ok_or_else(|| {
        ContentExtractorError::InvalidResponse("completion has no choices".to_string())
    })?;

    let mut metadata = Map::new();
    if let Some(model) = completion.model {
        metadata.insert("model".to_string(), Value::String(model));
    }
    if let Some(id) = completion.id {
        metadata.insert("completion_id".to_string(), Value::String(id));
    }
    if let Some(reason) = choice.finish_reason {
        metadata.insert("finish_reason".to_string(), Value::String(reason));
    }
    if let Some(usage) = completion.usage {
        metadata.insert("usage".to_string(), usage);
    }

    Ok(Extraction {
        text: choice.message.content.unwrap_or_default().trim().to_string(),
        metadata,
        confidence: completion.confidence,
    })
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Value>,
    #[serde(default)]
    confidence: Option<f32>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
