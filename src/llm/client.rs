// src/llm/client.rs
use super::types::{ChatCompletionResponse, ChatRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM API returned error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("LLM API returned no completion choices")]
    EmptyCompletion,
}

/// Anything that can turn a chat request into completion text
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

/// Groq's OpenAI-compatible chat completion endpoint
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChatBackend for GroqClient {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        info!(
            "Sending completion request (model: {}, max_tokens: {})",
            request.model, request.max_tokens
        );
        debug!("Prompt: {}", request.last_user_content());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to send request to LLM API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("LLM API error {}: {}", status, body);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse LLM API response")?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyCompletion)?;

        Ok(content.trim().to_string())
    }
}
