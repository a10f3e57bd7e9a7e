//! OpenAI-compatible chat completions client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ModelEndpointConfig;

use super::llm::GenerativeModel;
use super::AdvisorError;

const SYSTEM_PROMPT: &str = "You are a senior QA engineer for regulated healthcare software. \
     Answer only in the requested JSON format.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// [`GenerativeModel`] over HTTP
pub struct HttpModelClient {
    client: reqwest::Client,
    config: ModelEndpointConfig,
    timeout: Duration,
}

impl HttpModelClient {
    /// Build a client whose requests give up after `timeout`
    pub fn new(config: ModelEndpointConfig, timeout: Duration) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdvisorError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config,
            timeout,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> AdvisorError {
        if err.is_timeout() {
            AdvisorError::Timeout(self.timeout)
        } else {
            AdvisorError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl GenerativeModel for HttpModelClient {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut builder = self.client.post(self.config.endpoint.as_str()).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AdvisorError::EmptyResponse)
    }
}
