//! HTTP chat backend

use super::{ChatBackend, ChatError};
use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Talks to `POST /api/chat` and `GET /api/health`
pub struct HttpChatBackend {
    client: Client,
    chat_url: String,
    health_url: String,
    health_timeout: Duration,
    use_agent: bool,
}

impl HttpChatBackend {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            chat_url: config.chat_url(),
            health_url: config.health_url(),
            health_timeout: config.health_timeout,
            use_agent: config.use_agent,
        }
    }

    fn classify_error(status: StatusCode, body: &str) -> ChatError {
        // FastAPI-style errors carry the reason in `detail`
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.to_string());

        ChatError::status(status.as_u16(), format!("HTTP {status}: {detail}"))
    }

    fn request_error(e: &reqwest::Error) -> ChatError {
        if e.is_timeout() {
            ChatError::network(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            ChatError::network(format!("Connection failed: {e}"))
        } else {
            ChatError::network(format!("Request failed: {e}"))
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<String, ChatError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::network(format!("Failed to read response: {e}")))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(Self::classify_error(status, &body))
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, text: &str) -> Result<String, ChatError> {
        let request = ChatRequest {
            text,
            use_agent: self.use_agent,
        };

        let response = self
            .client
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::request_error(&e))?;

        let body = Self::read_body(response).await?;
        let reply: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            ChatError::malformed(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Ok(reply.response)
    }

    async fn health(&self) -> Result<(), ChatError> {
        let response = self
            .client
            .get(&self.health_url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| Self::request_error(&e))?;

        let body = Self::read_body(response).await?;
        let health: HealthResponse = serde_json::from_str(&body).map_err(|e| {
            ChatError::malformed(format!("Failed to parse health response: {e} - body: {body}"))
        })?;

        if health.status == "healthy" {
            Ok(())
        } else {
            Err(ChatError::malformed(format!(
                "Backend reports status {:?}",
                health.status
            )))
        }
    }
}

// Backend API types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    use_agent: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}
