use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::{CommandDefinition, Interaction, OptionDefinition, Reply};
use crate::plugins::trait_def::SlashCommand;
use crate::routes::stage::MAX_TOPIC_LEN;

/// /topic - retitle the live stage
pub struct Topic;

#[async_trait]
impl SlashCommand for Topic {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("topic", "Change the topic of the live stage").with_option(
            OptionDefinition::string("text", "New topic")
                .required()
                .with_max_length(MAX_TOPIC_LEN as u16),
        )
    }

    async fn execute(&self, interaction: &Interaction, client: &Arc<BotClient>) -> Result<(), BotError> {
        let Some(channel_id) = client.config.station.stage_channel_id else {
            return interaction.reply(Reply::ephemeral("No stage channel is configured.")).await;
        };

        let topic = interaction.string_option("text").map(str::trim).unwrap_or_default();
        if topic.is_empty() || topic.chars().count() > MAX_TOPIC_LEN {
            return interaction
                .reply(Reply::ephemeral(format!("A topic needs 1 to {} characters.", MAX_TOPIC_LEN)))
                .await;
        }

        client.discord.set_stage_topic(channel_id, topic).await?;
        *client.station.stage_topic.write().await = Some(topic.to_string());
        client.logger.info(&format!("{} set the stage topic to '{}'", interaction.user.name, topic));

        interaction.reply(Reply::ephemeral(format!("Stage topic set to **{}**.", topic))).await
    }
}
