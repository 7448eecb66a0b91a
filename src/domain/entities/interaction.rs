use std::fmt;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::traits::Responder;

/// What the user did to produce an interaction
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionKind {
    /// A slash command invocation
    Command {
        name: String,
        options: Vec<CommandOption>,
    },
    /// A selection made in a select menu
    ComponentSelect {
        custom_id: String,
        values: Vec<String>,
    },
    /// Anything the dispatcher does not handle (buttons, modals, autocomplete)
    Other,
}

/// A resolved option value supplied with a command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

/// The user behind an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionUser {
    pub id: u64,
    pub name: String,
}

/// One entry of a select menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

/// A string select menu attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectMenu {
    pub custom_id: String,
    pub placeholder: Option<String>,
    pub options: Vec<SelectOption>,
}

/// Initial reply to an interaction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub content: String,
    pub ephemeral: bool,
    pub select: Option<SelectMenu>,
}

impl Reply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Reply visible only to the invoking user
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
            select: None,
        }
    }

    pub fn with_select(mut self, menu: SelectMenu) -> Self {
        self.select = Some(menu);
        self
    }
}

/// An inbound interaction, consumed once by the dispatcher.
///
/// Reply capabilities are delegated to the platform-specific `Responder`.
#[derive(Clone)]
pub struct Interaction {
    pub id: u64,
    pub kind: InteractionKind,
    pub user: InteractionUser,
    pub guild_id: Option<u64>,
    pub channel_id: Option<u64>,
    responder: Arc<dyn Responder>,
}

impl Interaction {
    pub fn new(id: u64, kind: InteractionKind, user: InteractionUser, responder: Arc<dyn Responder>) -> Self {
        Self {
            id,
            kind,
            user,
            guild_id: None,
            channel_id: None,
            responder,
        }
    }

    pub fn with_guild(mut self, guild_id: u64) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    pub fn with_channel(mut self, channel_id: u64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    /// Look up a string option by name
    pub fn string_option(&self, name: &str) -> Option<&str> {
        let InteractionKind::Command { options, .. } = &self.kind else {
            return None;
        };
        options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
            OptionValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Whether a reply or deferred placeholder has already been sent
    pub fn is_acknowledged(&self) -> bool {
        self.responder.is_acknowledged()
    }

    pub async fn reply(&self, reply: Reply) -> Result<(), BotError> {
        self.responder.reply(reply).await
    }

    pub async fn defer(&self, ephemeral: bool) -> Result<(), BotError> {
        self.responder.defer(ephemeral).await
    }

    pub async fn edit_reply(&self, content: &str) -> Result<(), BotError> {
        self.responder.edit_reply(content).await
    }
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("user", &self.user)
            .field("guild_id", &self.guild_id)
            .field("channel_id", &self.channel_id)
            .finish_non_exhaustive()
    }
}
