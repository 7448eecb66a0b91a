//! /playlist - current playlist with a request menu

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{CommandDefinition, Interaction, Reply, SelectMenu, SelectOption};
use crate::plugins::trait_def::SlashCommand;
use super::suggest::record_suggestion;
use super::truncate;

/// Custom id of the track select menu
pub const SELECT_ID: &str = "playlist-select";

/// Discord allows at most 25 options per select menu
const MAX_OPTIONS: usize = 25;
const MAX_LABEL_LEN: usize = 100;
/// Tracks listed in the message body
const LISTED_TRACKS: usize = 10;

pub struct PlaylistCommand;

#[async_trait]
impl SlashCommand for PlaylistCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("playlist", "Show the current playlist and request a track")
    }

    fn components(&self) -> Vec<String> {
        vec![SELECT_ID.to_string()]
    }

    async fn execute(&self, interaction: &Interaction, client: &Arc<BotClient>) -> Result<(), BotError> {
        let playlist = client.station.playlist.read().await.clone();
        if playlist.tracks.is_empty() {
            return interaction.reply(Reply::new("No playlist is loaded right now.")).await;
        }

        let mut content = format!("**{}** ({} tracks)\n", playlist.name, playlist.tracks.len());
        for (i, track) in playlist.tracks.iter().take(LISTED_TRACKS).enumerate() {
            content.push_str(&format!("{}. {}\n", i + 1, track.display()));
        }
        if playlist.tracks.len() > LISTED_TRACKS {
            content.push_str(&format!("…and {} more", playlist.tracks.len() - LISTED_TRACKS));
        }

        let options = playlist.tracks
            .iter()
            .take(MAX_OPTIONS)
            .enumerate()
            .map(|(i, track)| SelectOption {
                label: truncate(&track.display(), MAX_LABEL_LEN),
                value: i.to_string(),
                description: None,
            })
            .collect();
        let menu = SelectMenu {
            custom_id: SELECT_ID.to_string(),
            placeholder: Some("Request a track".to_string()),
            options,
        };

        interaction.reply(Reply::new(content.trim_end()).with_select(menu)).await
    }

    async fn select(&self, interaction: &Interaction, values: &[String], client: &Arc<BotClient>) -> Result<(), BotError> {
        let index: usize = values
            .first()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| CommandError::InvalidArgs(format!("Unexpected selection {:?}", values)))?;

        let track = client.station.playlist.read().await.tracks.get(index).cloned();
        let Some(track) = track else {
            return interaction.reply(Reply::ephemeral("That track is no longer in the playlist.")).await;
        };

        record_suggestion(client, interaction, &track.display()).await?;
        interaction.reply(Reply::ephemeral(format!("Requested **{}**.", track.display()))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Playlist, Track};
    use crate::testing::{self, RecordingResponder, Sent};

    async fn with_tracks(client: &Arc<BotClient>, count: usize) {
        let tracks = (1..=count).map(|i| Track::new(format!("Track {}", i)).with_artist("DJ")).collect();
        *client.station.playlist.write().await = Playlist {
            name: "Friday".to_string(),
            tracks,
            updated_at: None,
        };
    }

    #[tokio::test]
    async fn test_empty_playlist() {
        let responder = RecordingResponder::new();
        PlaylistCommand
            .execute(&testing::command_interaction("playlist", responder.clone()), &testing::client())
            .await
            .unwrap();
        assert_eq!(responder.sent(), vec![Sent::Reply(Reply::new("No playlist is loaded right now."))]);
    }

    #[tokio::test]
    async fn test_menu_is_capped_at_25_options() {
        let client = testing::client();
        with_tracks(&client, 30).await;
        let responder = RecordingResponder::new();

        PlaylistCommand
            .execute(&testing::command_interaction("playlist", responder.clone()), &client)
            .await
            .unwrap();

        let sent = responder.sent();
        let Sent::Reply(reply) = &sent[0] else { panic!("expected reply, got {:?}", sent) };
        let menu = reply.select.as_ref().unwrap();
        assert_eq!(menu.custom_id, SELECT_ID);
        assert_eq!(menu.options.len(), 25);
        assert!(reply.content.starts_with("**Friday** (30 tracks)"));
        assert!(reply.content.ends_with("…and 20 more"));
    }

    #[tokio::test]
    async fn test_selection_records_suggestion() {
        let client = testing::client();
        with_tracks(&client, 3).await;
        let responder = RecordingResponder::new();
        let interaction = testing::select_interaction(SELECT_ID, &["1"], responder.clone());

        PlaylistCommand.select(&interaction, &["1".to_string()], &client).await.unwrap();

        assert_eq!(client.store.recent(1).await.unwrap()[0].text, "DJ - Track 2");
        assert_eq!(responder.sent(), vec![Sent::Reply(Reply::ephemeral("Requested **DJ - Track 2**."))]);
    }

    #[tokio::test]
    async fn test_stale_selection() {
        let client = testing::client();
        with_tracks(&client, 1).await;
        let responder = RecordingResponder::new();
        let interaction = testing::select_interaction(SELECT_ID, &["4"], responder.clone());

        PlaylistCommand.select(&interaction, &["4".to_string()], &client).await.unwrap();
        assert!(client.store.recent(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_garbage_selection_is_an_error() {
        let client = testing::client();
        let responder = RecordingResponder::new();
        let interaction = testing::select_interaction(SELECT_ID, &["x"], responder);
        assert!(PlaylistCommand.select(&interaction, &["x".to_string()], &client).await.is_err());
    }
}
