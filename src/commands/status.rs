use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::{CommandDefinition, Interaction, StreamStatus};
use crate::plugins::trait_def::SlashCommand;

/// /status - live stream status. The lookup can be slow, so the reply is deferred.
pub struct Status;

fn describe(status: &StreamStatus) -> String {
    if !status.online {
        return "The stream is offline.".to_string();
    }
    let listeners = match status.listeners {
        1 => "1 listener".to_string(),
        n => format!("{} listeners", n),
    };
    match &status.now_playing {
        Some(track) => format!("🔴 Live with {}. Now playing: **{}**", listeners, track),
        None => format!("🔴 Live with {}.", listeners),
    }
}

#[async_trait]
impl SlashCommand for Status {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("status", "Show whether the stream is live")
    }

    async fn execute(&self, interaction: &Interaction, client: &Arc<BotClient>) -> Result<(), BotError> {
        interaction.defer(false).await?;
        let status = client.stream.fetch().await?;
        interaction.edit_reply(&describe(&status)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, RecordingResponder, Sent};

    #[tokio::test]
    async fn test_defers_then_edits() {
        let client = testing::client_with_stream(StreamStatus {
            online: true,
            listeners: 12,
            now_playing: Some("Boards of Canada - Roygbiv".to_string()),
        });
        let responder = RecordingResponder::new();

        Status.execute(&testing::command_interaction("status", responder.clone()), &client).await.unwrap();

        assert_eq!(
            responder.sent(),
            vec![
                Sent::Defer(false),
                Sent::Edit("🔴 Live with 12 listeners. Now playing: **Boards of Canada - Roygbiv**".to_string()),
            ]
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&StreamStatus::offline()), "The stream is offline.");
        let one = StreamStatus { online: true, listeners: 1, now_playing: None };
        assert_eq!(describe(&one), "🔴 Live with 1 listener.");
    }
}
