//! Remote log collection

use super::LogEntry;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Failure to deliver an entry to the collector
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("collector returned HTTP {0}")]
    Status(u16),
}

/// Destination for forwarded log entries
#[async_trait]
pub trait LogCollector: Send + Sync {
    async fn dispatch(&self, entry: &LogEntry) -> Result<(), CollectorError>;
}

/// POSTs each entry as JSON to the collector endpoint
pub struct HttpLogCollector {
    client: Client,
    url: String,
}

impl HttpLogCollector {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LogCollector for HttpLogCollector {
    async fn dispatch(&self, entry: &LogEntry) -> Result<(), CollectorError> {
        let response = self
            .client
            .post(&self.url)
            .json(entry)
            .send()
            .await
            .map_err(|e| CollectorError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CollectorError::Status(status.as_u16()))
        }
    }
}
