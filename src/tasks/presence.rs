use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::plugins::trait_def::BackgroundTask;

/// Keeps the "Listening to ..." activity in sync with the stream
pub struct Presence;

#[async_trait]
impl BackgroundTask for Presence {
    async fn execute(&self, client: &Arc<BotClient>) -> Result<(), BotError> {
        let now_playing = match client.stream.fetch().await {
            Ok(status) if status.online => status.now_playing.filter(|t| !t.is_empty()),
            Ok(_) => None,
            Err(e) => {
                client.logger.debug(&format!("Stream status unavailable: {}", e));
                None
            }
        };
        let fallback = client.config.bot.activity.as_deref().unwrap_or("the station");

        client.discord.set_activity(now_playing.as_deref().unwrap_or(fallback)).await
    }
}
