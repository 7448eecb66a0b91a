use async_trait::async_trait;
use crate::application::errors::BotError;

/// Discord trait - abstraction over the platform actions plugins perform
/// outside of an interaction reply
#[async_trait]
pub trait Discord: Send + Sync {
    /// Set the bot's "Listening to" activity
    async fn set_activity(&self, text: &str) -> Result<(), BotError>;

    /// Send a message to a text channel
    async fn send_message(&self, channel_id: u64, content: &str) -> Result<(), BotError>;

    /// Open a stage instance on a stage channel
    async fn start_stage(&self, channel_id: u64, topic: &str) -> Result<(), BotError>;

    /// Change the topic of a live stage instance
    async fn set_stage_topic(&self, channel_id: u64, topic: &str) -> Result<(), BotError>;

    /// Close the stage instance
    async fn end_stage(&self, channel_id: u64) -> Result<(), BotError>;
}

/// Discord stand-in used when no gateway connection exists (plugin checks, tests).
/// Every action succeeds and is logged at debug level.
#[derive(Debug, Default, Clone)]
pub struct OfflineDiscord;

#[async_trait]
impl Discord for OfflineDiscord {
    async fn set_activity(&self, text: &str) -> Result<(), BotError> {
        tracing::debug!("offline: set activity '{}'", text);
        Ok(())
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<(), BotError> {
        tracing::debug!("offline: message to {}: {}", channel_id, content);
        Ok(())
    }

    async fn start_stage(&self, channel_id: u64, topic: &str) -> Result<(), BotError> {
        tracing::debug!("offline: start stage {} '{}'", channel_id, topic);
        Ok(())
    }

    async fn set_stage_topic(&self, channel_id: u64, topic: &str) -> Result<(), BotError> {
        tracing::debug!("offline: stage {} topic '{}'", channel_id, topic);
        Ok(())
    }

    async fn end_stage(&self, channel_id: u64) -> Result<(), BotError> {
        tracing::debug!("offline: end stage {}", channel_id);
        Ok(())
    }
}
