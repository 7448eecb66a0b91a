//! Gateway handler - Forwards serenity events to the client's event emitter

use serenity::all::{
    Client, CommandDataOption, CommandDataOptionValue, ComponentInteractionDataKind, Context,
    GatewayIntents, Http, Interaction as GatewayInteraction, Ready, VoiceState,
};
use serenity::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::{
    BotEvent, CommandOption, Interaction, InteractionKind, InteractionUser, OptionValue,
};
use super::responder::{SerenityResponder, Source};
use super::SerenityDiscord;

struct GatewayHandler {
    client: Arc<BotClient>,
    discord: Arc<SerenityDiscord>,
}

#[async_trait]
impl serenity::all::EventHandler for GatewayHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        self.discord.attach_shard(ctx.shard.clone());
        self.client.events.emit(BotEvent::Ready {
            user_name: ready.user.name.clone(),
            guild_count: ready.guilds.len(),
        }).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: GatewayInteraction) {
        match convert_interaction(ctx.http.clone(), interaction) {
            Some(interaction) => {
                self.client.events.emit(BotEvent::InteractionCreate(interaction)).await;
            }
            None => tracing::debug!("Ignoring unsupported interaction type"),
        }
    }

    async fn voice_state_update(&self, _ctx: Context, _old: Option<VoiceState>, new: VoiceState) {
        self.client.events.emit(BotEvent::VoiceStateUpdate {
            guild_id: new.guild_id.map(|g| g.get()),
            channel_id: new.channel_id.map(|c| c.get()),
            user_id: new.user_id.get(),
        }).await;
    }
}

fn convert_options(options: &[CommandDataOption]) -> Vec<CommandOption> {
    options
        .iter()
        .filter_map(|o| {
            let value = match &o.value {
                CommandDataOptionValue::String(s) => OptionValue::String(s.clone()),
                CommandDataOptionValue::Integer(i) => OptionValue::Integer(*i),
                CommandDataOptionValue::Number(n) => OptionValue::Number(*n),
                CommandDataOptionValue::Boolean(b) => OptionValue::Boolean(*b),
                _ => return None,
            };
            Some(CommandOption { name: o.name.clone(), value })
        })
        .collect()
}

/// Convert a serenity interaction; `None` for kinds the bot does not handle
fn convert_interaction(http: Arc<Http>, interaction: GatewayInteraction) -> Option<Interaction> {
    match interaction {
        GatewayInteraction::Command(command) => {
            let kind = InteractionKind::Command {
                name: command.data.name.clone(),
                options: convert_options(&command.data.options),
            };
            let user = InteractionUser { id: command.user.id.get(), name: command.user.name.clone() };
            let guild_id = command.guild_id.map(|g| g.get());
            let channel_id = command.channel_id.get();
            let id = command.id.get();
            let responder = Arc::new(SerenityResponder::new(http, Source::Command(command)));

            let interaction = Interaction::new(id, kind, user, responder).with_channel(channel_id);
            Some(match guild_id {
                Some(guild_id) => interaction.with_guild(guild_id),
                None => interaction,
            })
        }
        GatewayInteraction::Component(component) => {
            let kind = match &component.data.kind {
                ComponentInteractionDataKind::StringSelect { values } => InteractionKind::ComponentSelect {
                    custom_id: component.data.custom_id.clone(),
                    values: values.clone(),
                },
                _ => InteractionKind::Other,
            };
            let user = InteractionUser { id: component.user.id.get(), name: component.user.name.clone() };
            let guild_id = component.guild_id.map(|g| g.get());
            let channel_id = component.channel_id.get();
            let id = component.id.get();
            let responder = Arc::new(SerenityResponder::new(http, Source::Component(component)));

            let interaction = Interaction::new(id, kind, user, responder).with_channel(channel_id);
            Some(match guild_id {
                Some(guild_id) => interaction.with_guild(guild_id),
                None => interaction,
            })
        }
        _ => None,
    }
}

/// Connect to the gateway and run until shutdown
pub async fn start_gateway(client: Arc<BotClient>, discord: Arc<SerenityDiscord>, token: &str) -> Result<(), BotError> {
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_VOICE_STATES;
    let handler = GatewayHandler { client, discord };

    let mut gateway = Client::builder(token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Connecting to Discord gateway...");
    gateway.start().await?;
    Ok(())
}
