//! Plugin trait definitions
//!
//! Every plugin category has one handler contract. The loader validates an
//! imported module against its category and registers the handler it carries.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::{BotEvent, CommandDefinition, Interaction};
use crate::domain::traits::Logger;

/// Plugin categories, one directory each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Command,
    Event,
    Task,
    Route,
    Util,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Util,
        Category::Command,
        Category::Event,
        Category::Task,
        Category::Route,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Command => "command",
            Category::Event => "event",
            Category::Task => "task",
            Category::Route => "route",
            Category::Util => "util",
        }
    }

    /// Default directory name under the plugin base path
    pub fn directory(&self) -> &'static str {
        match self {
            Category::Command => "commands",
            Category::Event => "events",
            Category::Task => "tasks",
            Category::Route => "routes",
            Category::Util => "utils",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A slash command, optionally owning select menus
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Name, description and options as deployed to Discord
    fn definition(&self) -> CommandDefinition;

    /// Custom ids of the select menus this command handles
    fn components(&self) -> Vec<String> {
        Vec::new()
    }

    async fn execute(&self, interaction: &Interaction, client: &Arc<BotClient>) -> Result<(), BotError>;

    /// Handle a selection in one of `components()`
    async fn select(
        &self,
        _interaction: &Interaction,
        _values: &[String],
        _client: &Arc<BotClient>,
    ) -> Result<(), BotError> {
        Ok(())
    }
}

/// A gateway event listener
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The client is passed as trailing argument by the registered wrapper
    async fn execute(&self, event: &BotEvent, client: &Arc<BotClient>) -> Result<(), BotError>;
}

/// A background task
#[async_trait]
pub trait BackgroundTask: Send + Sync {
    async fn execute(&self, client: &Arc<BotClient>) -> Result<(), BotError>;
}

/// Builds the router for one route file
pub type RouteFactory = Arc<dyn Fn(Arc<BotClient>, Arc<dyn Logger>) -> axum::Router + Send + Sync>;

/// Side effect run when a util module is imported
pub type UtilInit = fn();
