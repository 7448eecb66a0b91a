//! Bot client - The long-lived context shared by every plugin

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::events::EventEmitter;
use crate::application::registry::Registry;
use crate::application::scheduler::Scheduler;
use crate::domain::entities::Playlist;
use crate::domain::traits::{Discord, Logger, StreamStatusSource, SuggestionStore};
use crate::infrastructure::config::Config;
use crate::plugins::trait_def::SlashCommand;

/// Mutable station state pushed through the HTTP API
#[derive(Default)]
pub struct StationState {
    pub playlist: RwLock<Playlist>,
    /// Topic of the live stage instance, `None` when the stage is closed
    pub stage_topic: RwLock<Option<String>>,
}

/// Context object constructed once at startup and passed by `Arc`.
///
/// The loader fills `commands`, `components`, `events` and `scheduler`
/// before the gateway connects; afterwards they are only read.
pub struct BotClient {
    pub config: Config,
    pub commands: Registry<Arc<dyn SlashCommand>>,
    /// Select-menu custom ids mapped to the command that handles them
    pub components: Registry<Arc<dyn SlashCommand>>,
    pub events: EventEmitter,
    pub scheduler: Scheduler,
    pub station: StationState,
    pub discord: Arc<dyn Discord>,
    pub store: Arc<dyn SuggestionStore>,
    pub stream: Arc<dyn StreamStatusSource>,
    pub logger: Arc<dyn Logger>,
}

impl BotClient {
    pub fn new(
        config: Config,
        discord: Arc<dyn Discord>,
        store: Arc<dyn SuggestionStore>,
        stream: Arc<dyn StreamStatusSource>,
        logger: Arc<dyn Logger>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            commands: Registry::new(),
            components: Registry::new(),
            events: EventEmitter::new(logger.clone()),
            scheduler: Scheduler::new(logger.clone()),
            station: StationState::default(),
            discord,
            store,
            stream,
            logger,
        })
    }
}

impl Drop for BotClient {
    fn drop(&mut self) {
        self.scheduler.shutdown();
    }
}
