//! Built-in gateway event listeners

pub mod interaction_create;
pub mod ready;
pub mod voice_state_update;

use std::sync::Arc;

use crate::domain::entities::BotEvent;
use crate::plugins::descriptor::Module;

/// Event modules shipped with the bot, keyed by event name
pub fn catalog() -> Vec<(&'static str, Module)> {
    vec![
        (
            BotEvent::READY,
            Module::event(BotEvent::READY, true, Arc::new(ready::Ready)),
        ),
        (
            BotEvent::INTERACTION_CREATE,
            Module::event(BotEvent::INTERACTION_CREATE, false, Arc::new(interaction_create::InteractionCreate::new())),
        ),
        (
            BotEvent::VOICE_STATE_UPDATE,
            Module::event(BotEvent::VOICE_STATE_UPDATE, false, Arc::new(voice_state_update::VoiceStateUpdate)),
        ),
    ]
}
