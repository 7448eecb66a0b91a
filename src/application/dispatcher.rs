//! Interaction dispatcher - Routes interactions to command handlers

use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::{Interaction, InteractionKind, Reply};
use crate::domain::traits::Logger;
use crate::plugins::trait_def::SlashCommand;

/// Reply sent to the user whenever a handler fails
pub const FAILURE_MESSAGE: &str = "There was an error while executing this command!";

/// Where an interaction should go
enum Route {
    Command(String, Arc<dyn SlashCommand>),
    Select(String, Vec<String>, Arc<dyn SlashCommand>),
    Ignore,
}

/// Dispatches inbound interactions.
///
/// `dispatch` never returns an error: every path ends in a handler call, a
/// generic failure reply, or a line on the client's logger.
pub struct InteractionDispatcher;

impl InteractionDispatcher {
    pub fn new() -> Self {
        Self
    }

    pub async fn dispatch(&self, client: &Arc<BotClient>, interaction: Interaction) {
        let logger = client.logger.clone();
        let route = match self.classify(client, &interaction) {
            Ok(route) => route,
            Err(e) => {
                // Reply state is unknown here, so only log
                logger.error(&format!("Failed to classify interaction {}: {}", interaction.id, e));
                return;
            }
        };

        match route {
            Route::Command(name, handler) => {
                logger.debug(&format!("/{} from {} ({})", name, interaction.user.name, interaction.user.id));
                let client = client.clone();
                let call = interaction.clone();
                let outcome = tokio::spawn(async move { handler.execute(&call, &client).await }).await;
                self.settle(logger.as_ref(), &interaction, &format!("command /{}", name), outcome).await;
            }
            Route::Select(custom_id, values, handler) => {
                logger.debug(&format!("Selection '{}' from {}: {:?}", custom_id, interaction.user.name, values));
                let client = client.clone();
                let call = interaction.clone();
                let outcome = tokio::spawn(async move { handler.select(&call, &values, &client).await }).await;
                self.settle(logger.as_ref(), &interaction, &format!("selection '{}'", custom_id), outcome).await;
            }
            Route::Ignore => {}
        }
    }

    fn classify(&self, client: &BotClient, interaction: &Interaction) -> Result<Route, BotError> {
        match &interaction.kind {
            InteractionKind::Command { name, .. } => match client.commands.get(name)? {
                Some(handler) => Ok(Route::Command(name.clone(), handler)),
                None => {
                    // Declared on Discord but not loaded here: deploy skew
                    client.logger.debug(&format!("No handler for /{}, ignoring", name));
                    Ok(Route::Ignore)
                }
            },
            InteractionKind::ComponentSelect { custom_id, values } => match client.components.get(custom_id)? {
                Some(handler) => Ok(Route::Select(custom_id.clone(), values.clone(), handler)),
                None => {
                    client.logger.debug(&format!("No handler for component '{}', ignoring", custom_id));
                    Ok(Route::Ignore)
                }
            },
            InteractionKind::Other => Ok(Route::Ignore),
        }
    }

    /// Turn a handler outcome into at most one failure reply
    async fn settle(
        &self,
        logger: &dyn Logger,
        interaction: &Interaction,
        what: &str,
        outcome: Result<Result<(), BotError>, tokio::task::JoinError>,
    ) {
        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(e) if e.is_panic() => "handler panicked".to_string(),
            Err(e) => e.to_string(),
        };
        logger.error(&format!("Error executing {}: {}", what, failure));

        let sent = if interaction.is_acknowledged() {
            interaction.edit_reply(FAILURE_MESSAGE).await
        } else {
            interaction.reply(Reply::ephemeral(FAILURE_MESSAGE)).await
        };
        if let Err(e) = sent {
            logger.error(&format!("Failed to send failure reply for {}: {}", what, e));
        }
    }
}

impl Default for InteractionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
