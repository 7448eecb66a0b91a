//! Domain entities - Core business objects

pub mod command;
pub mod event;
pub mod interaction;
pub mod station;
pub mod suggestion;

pub use command::{CommandDefinition, OptionDefinition, OptionKind};
pub use event::BotEvent;
pub use interaction::{
    CommandOption, Interaction, InteractionKind, InteractionUser, OptionValue, Reply, SelectMenu,
    SelectOption,
};
pub use station::{Playlist, StreamStatus, Track};
pub use suggestion::Suggestion;
