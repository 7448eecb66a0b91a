//! Stream status - Polls the station's JSON status endpoint

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::StreamStatus;
use crate::domain::traits::StreamStatusSource;

/// Request timeout for status polls
const TIMEOUT: Duration = Duration::from_secs(10);

/// Status source backed by an HTTP endpoint returning
/// `{"online": true, "listeners": 12, "now_playing": "Artist - Title"}`
pub struct HttpStreamStatus {
    client: Client,
    url: Option<String>,
}

impl HttpStreamStatus {
    pub fn new(url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client ({}), using defaults", e);
                Client::new()
            });
        Self { client, url }
    }
}

#[async_trait]
impl StreamStatusSource for HttpStreamStatus {
    async fn fetch(&self) -> Result<StreamStatus, BotError> {
        let url = self.url.as_deref()
            .ok_or_else(|| CommandError::NotConfigured("station.stream-status-url".to_string()))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(BotError::Network(format!("Status endpoint returned {}", response.status())));
        }
        Ok(response.json::<StreamStatus>().await?)
    }
}
