use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::domain::entities::StreamStatus;

/// Source of the live stream status
#[async_trait]
pub trait StreamStatusSource: Send + Sync {
    async fn fetch(&self) -> Result<StreamStatus, BotError>;
}
