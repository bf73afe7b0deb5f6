use crate::error::GenerationError;
use crate::providers::traits::{CompletionRequest, Generator};
use crate::text::normalize;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// Sampling parameters tuned for short conversational replies.
const TEMPERATURE: f64 = 0.9;
const TOP_P: f64 = 1.0;
const FREQUENCY_PENALTY: f64 = 0.33;
const PRESENCE_PENALTY: f64 = 0.6;

/// OpenAI text-completions binding for the [`Generator`] capability.
pub struct OpenAiCompletions {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct HttpCompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
    stop: &'a [String],
}

#[derive(Debug, Deserialize)]
struct HttpCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

impl OpenAiCompletions {
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        Self {
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(std::time::Duration::from_secs(90))
                .tcp_keepalive(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Point the binding at a different API root (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Generator for OpenAiCompletions {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GenerationError> {
        let body = HttpCompletionRequest {
            model: &self.model,
            prompt: request.prompt,
            temperature: TEMPERATURE,
            max_tokens: request.max_tokens,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
            stop: &request.stop,
        };

        let mut http_request = self
            .client
            .post(format!("{}/completions", self.base_url))
            .json(&body);
        if let Some(auth_header) = self.cached_auth_header.as_ref() {
            http_request = http_request.header("Authorization", auth_header);
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: HttpCompletionResponse = response
            .json()
            .await
            .map_err(|error| GenerationError::Malformed(error.to_string()))?;

        let text = parsed
            .choices
            .first()
            .map(|choice| normalize(&choice.text))
            .unwrap_or_default();
        if text.is_empty() {
            return Err(GenerationError::EmptyReply);
        }

        Ok(text)
    }
}
