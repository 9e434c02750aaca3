use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::{OpenAiConfig, RequestConfig};
use crate::error::{CompletionError, CompletionResult};

/// Something that turns a message exchange into completion text.
///
/// The key is supplied per call because the service holds none of its own.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run one chat completion and return the text of the first choice
    async fn complete(
        &self,
        api_key: &str,
        messages: Vec<ChatMessage>,
    ) -> CompletionResult<String>;
}

/// Client for an OpenAI-compatible chat-completion API
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    request_config: RequestConfig,
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(config: &OpenAiConfig, request_config: RequestConfig) -> CompletionResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = request_config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(CompletionError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            request_config,
        })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured model
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn execute_request(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> CompletionResult<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Calling chat completion"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| match self.request_config.timeout_ms {
                Some(timeout_ms) if e.is_timeout() => CompletionError::Timeout { timeout_ms },
                _ => CompletionError::Http(e),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let completion: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| CompletionError::InvalidResponse {
                    message: format!("Failed to parse response: {}", e),
                })?;

        completion
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| CompletionError::InvalidResponse {
                message: "Response contained no choices".to_string(),
            })
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        messages: Vec<ChatMessage>,
    ) -> CompletionResult<String> {
        let request = ChatCompletionRequest::new(&self.model, messages, self.temperature);
        let start = Instant::now();

        match self.execute_request(api_key, &request).await {
            Ok(text) => {
                info!(
                    model = %self.model,
                    latency_ms = start.elapsed().as_millis(),
                    "Chat completion succeeded"
                );
                Ok(text)
            }
            Err(e) => {
                error!(
                    model = %self.model,
                    error = %e,
                    latency_ms = start.elapsed().as_millis(),
                    "Chat completion failed"
                );
                Err(e)
            }
        }
    }
}
