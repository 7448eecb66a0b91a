use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::BotEvent;
use crate::plugins::trait_def::EventHandler;

/// Logs listeners joining and leaving the stage channel
pub struct VoiceStateUpdate;

#[async_trait]
impl EventHandler for VoiceStateUpdate {
    async fn execute(&self, event: &BotEvent, client: &Arc<BotClient>) -> Result<(), BotError> {
        let BotEvent::VoiceStateUpdate { channel_id, user_id, .. } = event else {
            return Ok(());
        };

        let stage = client.config.station.stage_channel_id;
        match (*channel_id, stage) {
            (Some(channel), Some(stage)) if channel == stage => {
                client.logger.debug(&format!("User {} joined the stage", user_id));
            }
            (None, Some(_)) => client.logger.debug(&format!("User {} left voice", user_id)),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::Logger;
    use crate::testing::{self, MemoryLogger};

    #[tokio::test]
    async fn test_stage_join_is_logged() {
        let logger = MemoryLogger::new();
        let (base, _) = testing::client_with_discord(|config| config.station.stage_channel_id = Some(42));
        let client = BotClient::new(
            base.config.clone(),
            base.discord.clone(),
            base.store.clone(),
            base.stream.clone(),
            logger.clone() as Arc<dyn Logger>,
        );

        let join = BotEvent::VoiceStateUpdate { guild_id: Some(1), channel_id: Some(42), user_id: 9 };
        let other = BotEvent::VoiceStateUpdate { guild_id: Some(1), channel_id: Some(43), user_id: 9 };
        VoiceStateUpdate.execute(&join, &client).await.unwrap();
        VoiceStateUpdate.execute(&other, &client).await.unwrap();

        assert!(logger.contains("User 9 joined the stage"));
        assert_eq!(logger.count("DEBUG"), 1);
    }
}
