//! Discord adapter - serenity implementation of the platform seams

pub mod deploy;
pub mod gateway;
pub mod responder;

use async_trait::async_trait;
use serenity::all::{ActivityData, ChannelId, CreateStageInstance, EditStageInstance, Http, ShardMessenger};
use std::sync::{Arc, RwLock};

use crate::application::errors::BotError;
use crate::domain::traits::Discord;

pub use deploy::deploy_commands;
pub use gateway::start_gateway;
pub use responder::SerenityResponder;

/// Platform actions over serenity's REST client and the gateway shard
pub struct SerenityDiscord {
    http: Arc<Http>,
    shard: RwLock<Option<ShardMessenger>>,
}

impl SerenityDiscord {
    pub fn new(token: &str) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
            shard: RwLock::new(None),
        }
    }

    /// Remember the shard once the gateway is ready; presence updates go through it
    pub fn attach_shard(&self, shard: ShardMessenger) {
        match self.shard.write() {
            Ok(mut slot) => *slot = Some(shard),
            Err(_) => tracing::error!("Shard lock poisoned, presence updates disabled"),
        }
    }
}

#[async_trait]
impl Discord for SerenityDiscord {
    async fn set_activity(&self, text: &str) -> Result<(), BotError> {
        let shard = self.shard.read()
            .map_err(|_| BotError::Internal("Shard lock poisoned".to_string()))?
            .clone()
            .ok_or_else(|| BotError::Discord("Gateway not connected".to_string()))?;
        shard.set_activity(Some(ActivityData::listening(text)));
        Ok(())
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<(), BotError> {
        ChannelId::new(channel_id).say(&self.http, content).await?;
        Ok(())
    }

    async fn start_stage(&self, channel_id: u64, topic: &str) -> Result<(), BotError> {
        ChannelId::new(channel_id)
            .create_stage_instance(&self.http, CreateStageInstance::new(topic))
            .await?;
        Ok(())
    }

    async fn set_stage_topic(&self, channel_id: u64, topic: &str) -> Result<(), BotError> {
        ChannelId::new(channel_id)
            .edit_stage_instance(&self.http, EditStageInstance::new().topic(topic))
            .await?;
        Ok(())
    }

    async fn end_stage(&self, channel_id: u64) -> Result<(), BotError> {
        ChannelId::new(channel_id).delete_stage_instance(&self.http).await?;
        Ok(())
    }
}
