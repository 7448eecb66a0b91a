use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::{CommandDefinition, Interaction, Reply};
use crate::plugins::trait_def::SlashCommand;

/// /ping - liveness check
pub struct Ping;

#[async_trait]
impl SlashCommand for Ping {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("ping", "Check that the bot is alive")
    }

    async fn execute(&self, interaction: &Interaction, _client: &Arc<BotClient>) -> Result<(), BotError> {
        interaction.reply(Reply::new("Pong!")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, RecordingResponder, Sent};

    #[tokio::test]
    async fn test_ping_replies_pong() {
        let responder = RecordingResponder::new();
        Ping.execute(&testing::command_interaction("ping", responder.clone()), &testing::client())
            .await
            .unwrap();
        assert_eq!(responder.sent(), vec![Sent::Reply(Reply::new("Pong!"))]);
    }
}
