//! /suggest - song suggestions from listeners

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::{CommandDefinition, Interaction, OptionDefinition, Reply, Suggestion};
use crate::plugins::trait_def::SlashCommand;

/// Longest suggestion accepted
pub const MAX_SUGGESTION_LEN: u16 = 200;

pub struct Suggest;

/// Store a suggestion and forward it to the suggestions channel, if one is
/// configured. Returns how many suggestions the user has made so far.
pub(crate) async fn record_suggestion(
    client: &Arc<BotClient>,
    interaction: &Interaction,
    text: &str,
) -> Result<u64, BotError> {
    let user = &interaction.user;
    let suggestion = Suggestion::new(user.id, user.name.clone(), text).with_guild(interaction.guild_id);
    client.store.add(&suggestion).await?;

    if let Some(channel_id) = client.config.station.suggestions_channel_id {
        let message = format!("🎵 **{}** suggested: {}", user.name, text);
        // The suggestion is already stored, a failed forward is not the user's problem
        if let Err(e) = client.discord.send_message(channel_id, &message).await {
            client.logger.warn(&format!("Failed to forward suggestion {}: {}", suggestion.id, e));
        }
    }

    Ok(client.store.count_for_user(user.id).await?)
}

#[async_trait]
impl SlashCommand for Suggest {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("suggest", "Suggest a song for the stream").with_option(
            OptionDefinition::string("song", "Artist and title")
                .required()
                .with_max_length(MAX_SUGGESTION_LEN),
        )
    }

    async fn execute(&self, interaction: &Interaction, client: &Arc<BotClient>) -> Result<(), BotError> {
        let song = interaction.string_option("song").map(str::trim).unwrap_or_default();
        if song.is_empty() {
            return interaction.reply(Reply::ephemeral("Tell me which song you'd like to hear.")).await;
        }

        let total = record_suggestion(client, interaction, song).await?;
        interaction
            .reply(Reply::ephemeral(format!("Thanks! **{}** was added to the suggestions ({} from you so far).", song, total)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, DiscordCall, RecordingResponder, Sent};

    #[tokio::test]
    async fn test_suggestion_is_stored_and_forwarded() {
        let (client, discord) = testing::client_with_discord(|config| {
            config.station.suggestions_channel_id = Some(55);
        });
        let responder = RecordingResponder::new();
        let interaction = testing::command_with_options("suggest", &[("song", " Daft Punk - Veridis Quo ")], responder.clone());

        Suggest.execute(&interaction, &client).await.unwrap();

        let stored = client.store.recent(10).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].text, "Daft Punk - Veridis Quo");
        assert_eq!(stored[0].guild_id, Some(10));
        assert_eq!(
            discord.calls(),
            vec![DiscordCall::SendMessage(55, "🎵 **listener** suggested: Daft Punk - Veridis Quo".to_string())]
        );
        assert!(matches!(&responder.sent()[..], [Sent::Reply(r)] if r.ephemeral && r.content.contains("1 from you")));
    }

    #[tokio::test]
    async fn test_forward_failure_still_confirms() {
        let (client, discord) = testing::client_with_discord(|config| {
            config.station.suggestions_channel_id = Some(55);
        });
        discord.fail_next();
        let responder = RecordingResponder::new();
        let interaction = testing::command_with_options("suggest", &[("song", "Song")], responder.clone());

        Suggest.execute(&interaction, &client).await.unwrap();
        assert_eq!(client.store.count_for_user(7).await.unwrap(), 1);
        assert_eq!(responder.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_song_is_not_stored() {
        let client = testing::client();
        let responder = RecordingResponder::new();
        let interaction = testing::command_with_options("suggest", &[("song", "   ")], responder.clone());

        Suggest.execute(&interaction, &client).await.unwrap();
        assert!(client.store.recent(1).await.unwrap().is_empty());
        assert_eq!(responder.sent(), vec![Sent::Reply(Reply::ephemeral("Tell me which song you'd like to hear."))]);
    }
}
