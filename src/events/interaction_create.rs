use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::dispatcher::InteractionDispatcher;
use crate::application::errors::BotError;
use crate::domain::entities::BotEvent;
use crate::plugins::trait_def::EventHandler;

/// Hands every interaction to the dispatcher
pub struct InteractionCreate {
    dispatcher: InteractionDispatcher,
}

impl InteractionCreate {
    pub fn new() -> Self {
        Self {
            dispatcher: InteractionDispatcher::new(),
        }
    }
}

impl Default for InteractionCreate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventHandler for InteractionCreate {
    async fn execute(&self, event: &BotEvent, client: &Arc<BotClient>) -> Result<(), BotError> {
        if let BotEvent::InteractionCreate(interaction) = event {
            self.dispatcher.dispatch(client, interaction.clone()).await;
        }
        Ok(())
    }
}
