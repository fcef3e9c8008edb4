//! Text generation via an OpenAI-compatible chat completion API.

use super::TextBackend;
use crate::error::ApiError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the external generative-text backend.
#[derive(Debug, Clone)]
pub struct GenaiClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    http: reqwest::Client,
}

// -- Wire types --------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<MessagePayload<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl GenaiClient {
    /// Create a new backend client. `timeout` bounds each attempt.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        max_tokens: u32,
        temperature: f64,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
            temperature,
            http,
        })
    }

    async fn send_once(&self, system: &str, prompt: &str) -> Result<String, SendError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                MessagePayload {
                    role: "system",
                    content: system,
                },
                MessagePayload {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Generation request to model: {}", self.model);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(SendError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SendError::Status(format!(
                "backend returned {status}: {body}"
            )));
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| SendError::Status(format!("failed to parse backend envelope: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| SendError::Status("backend returned an empty completion".into()))
    }
}

/// Internal split between retryable transport failures and final errors.
enum SendError {
    Transport(reqwest::Error),
    Status(String),
}

#[async_trait]
impl TextBackend for GenaiClient {
    /// One bounded attempt plus a single retry on transport-level failure
    /// (connect error or timeout). HTTP-level errors are never retried.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ApiError> {
        match self.send_once(system, prompt).await {
            Ok(text) => Ok(text),
            Err(SendError::Status(msg)) => Err(ApiError::Generation(msg)),
            Err(SendError::Transport(first)) => {
                warn!("Backend transport error, retrying once: {}", first);
                match self.send_once(system, prompt).await {
                    Ok(text) => Ok(text),
                    Err(SendError::Status(msg)) => Err(ApiError::Generation(msg)),
                    Err(SendError::Transport(second)) => Err(ApiError::Generation(format!(
                        "backend unreachable after retry: {second}"
                    ))),
                }
            }
        }
    }
}
