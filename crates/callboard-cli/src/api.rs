//! Callboard API Client

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;

/// Connection settings for the replay client, passed in at construction
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    /// Backoff before the single retry of a failed send
    pub retry_backoff: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            request_timeout: Duration::from_secs(10),
            retry_backoff: Duration::from_secs(1),
        }
    }
}

/// One call record on the wire, in the export convention: booleans as
/// "TRUE"/"FALSE", numbers as strings. The server coerces these.
#[derive(Debug, Clone, Serialize)]
pub struct CallPayload {
    pub phone: String,
    pub status: String,
    pub sentiment: String,
    pub call_human: String,
    pub summary: String,
    pub attempt: String,
    pub duration: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Outcome of posting one record, after the retry policy has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    Delivered(u16),
    /// Failed twice; carries the last HTTP status if one was received
    Failed(Option<u16>),
}

/// API Client for Callboard
pub struct CallboardClient {
    client: Client,
    config: ClientConfig,
}

impl CallboardClient {
    /// Create a new API client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.config.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// POST one record, retrying exactly once after a fixed backoff on
    /// network error or non-success status.
    pub async fn post_call(&self, payload: &CallPayload) -> PostOutcome {
        match self.try_post(payload).await {
            Ok(status) => PostOutcome::Delivered(status),
            Err(_) => {
                tokio::time::sleep(self.config.retry_backoff).await;
                match self.try_post(payload).await {
                    Ok(status) => PostOutcome::Delivered(status),
                    Err(last_status) => PostOutcome::Failed(last_status),
                }
            }
        }
    }

    async fn try_post(&self, payload: &CallPayload) -> std::result::Result<u16, Option<u16>> {
        let url = format!("{}/api/calls", self.config.base_url);
        let mut request = self.client.post(&url).json(payload);
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => Ok(resp.status().as_u16()),
            Ok(resp) => Err(Some(resp.status().as_u16())),
            Err(_) => Err(None),
        }
    }
}
