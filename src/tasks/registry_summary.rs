use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::BotEvent;
use crate::plugins::trait_def::BackgroundTask;

/// One-shot startup report of what the loader registered
pub struct RegistrySummary;

#[async_trait]
impl BackgroundTask for RegistrySummary {
    async fn execute(&self, client: &Arc<BotClient>) -> Result<(), BotError> {
        let commands = client.commands.names();
        let components = client.components.names();
        let events = [BotEvent::READY, BotEvent::INTERACTION_CREATE, BotEvent::VOICE_STATE_UPDATE]
            .iter()
            .map(|name| format!("{}={}", name, client.events.listener_count(name)))
            .collect::<Vec<_>>();
        let tasks = client.scheduler.tasks();

        client.logger.section("REGISTRY");
        client.logger.info(&format!("Commands ({}): {}", commands.len(), commands.join(", ")));
        if !components.is_empty() {
            client.logger.info(&format!("Components: {}", components.join(", ")));
        }
        client.logger.info(&format!("Listeners: {}", events.join(", ")));
        client.logger.info(&format!("Tasks: {}", tasks.len()));
        Ok(())
    }
}
