use super::Interaction;

/// Gateway events forwarded to event plugins
#[derive(Debug, Clone)]
pub enum BotEvent {
    Ready {
        user_name: String,
        guild_count: usize,
    },
    InteractionCreate(Interaction),
    VoiceStateUpdate {
        guild_id: Option<u64>,
        channel_id: Option<u64>,
        user_id: u64,
    },
}

impl BotEvent {
    pub const READY: &'static str = "ready";
    pub const INTERACTION_CREATE: &'static str = "interactionCreate";
    pub const VOICE_STATE_UPDATE: &'static str = "voiceStateUpdate";

    /// Listener key for this event
    pub fn name(&self) -> &'static str {
        match self {
            BotEvent::Ready { .. } => Self::READY,
            BotEvent::InteractionCreate(_) => Self::INTERACTION_CREATE,
            BotEvent::VoiceStateUpdate { .. } => Self::VOICE_STATE_UPDATE,
        }
    }
}
