use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::BotEvent;
use crate::plugins::trait_def::EventHandler;

/// Runs once the gateway session is ready: logs the session and sets the activity
pub struct Ready;

#[async_trait]
impl EventHandler for Ready {
    async fn execute(&self, event: &BotEvent, client: &Arc<BotClient>) -> Result<(), BotError> {
        let BotEvent::Ready { user_name, guild_count } = event else {
            return Ok(());
        };

        client.logger.section("READY");
        client.logger.info(&format!("Logged in as {} ({} guilds)", user_name, guild_count));
        client.logger.info(&format!("{} commands available", client.commands.len()));

        if let Some(activity) = client.config.bot.activity.as_deref().filter(|a| !a.is_empty()) {
            if let Err(e) = client.discord.set_activity(activity).await {
                client.logger.warn(&format!("Failed to set activity: {}", e));
            }
        }
        Ok(())
    }
}
