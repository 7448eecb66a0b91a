//! Test doubles shared by the unit tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::domain::entities::{
    BotEvent, CommandDefinition, CommandOption, Interaction, InteractionKind, InteractionUser,
    OptionValue, Reply, StreamStatus,
};
use crate::domain::traits::{Discord, Logger, Responder, StreamStatusSource};
use crate::infrastructure::config::Config;
use crate::infrastructure::database::Database;
use crate::plugins::trait_def::{BackgroundTask, EventHandler, RouteFactory, SlashCommand};

/// Client with default config, offline Discord and an in-memory store
pub fn client() -> Arc<BotClient> {
    client_with_discord(|_| {}).0
}

pub fn client_with_secret(secret: &str) -> Arc<BotClient> {
    client_with_discord(|config| config.api.secret = Some(secret.to_string())).0
}

/// Client whose Discord calls are recorded
pub fn client_with_discord(configure: impl FnOnce(&mut Config)) -> (Arc<BotClient>, Arc<RecordingDiscord>) {
    let mut config = Config::default();
    configure(&mut config);
    let discord = RecordingDiscord::new();
    let client = BotClient::new(
        config,
        discord.clone(),
        Arc::new(Database::in_memory().unwrap()),
        Arc::new(FixedStream(StreamStatus::offline())),
        MemoryLogger::new(),
    );
    (client, discord)
}

/// Client whose log lines can be inspected
pub fn client_with_logger() -> (Arc<BotClient>, Arc<MemoryLogger>) {
    let logger = MemoryLogger::new();
    let client = BotClient::new(
        Config::default(),
        RecordingDiscord::new(),
        Arc::new(Database::in_memory().unwrap()),
        Arc::new(FixedStream(StreamStatus::offline())),
        logger.clone(),
    );
    (client, logger)
}

/// Client whose stream source always reports `status`
pub fn client_with_stream(status: StreamStatus) -> Arc<BotClient> {
    BotClient::new(
        Config::default(),
        RecordingDiscord::new(),
        Arc::new(Database::in_memory().unwrap()),
        Arc::new(FixedStream(status)),
        MemoryLogger::new(),
    )
}

pub fn command_interaction(name: &str, responder: Arc<RecordingResponder>) -> Interaction {
    command_with_options(name, &[], responder)
}

/// Slash command interaction with string options
pub fn command_with_options(name: &str, options: &[(&str, &str)], responder: Arc<RecordingResponder>) -> Interaction {
    let kind = InteractionKind::Command {
        name: name.to_string(),
        options: options
            .iter()
            .map(|(k, v)| CommandOption { name: k.to_string(), value: OptionValue::String(v.to_string()) })
            .collect(),
    };
    Interaction::new(1, kind, user(), responder).with_guild(10).with_channel(20)
}

pub fn select_interaction(custom_id: &str, values: &[&str], responder: Arc<RecordingResponder>) -> Interaction {
    let kind = InteractionKind::ComponentSelect {
        custom_id: custom_id.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
    };
    Interaction::new(2, kind, user(), responder).with_guild(10).with_channel(20)
}

fn user() -> InteractionUser {
    InteractionUser { id: 7, name: "listener".to_string() }
}

/// Logger that keeps `LEVEL message` lines in memory
#[derive(Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, level: &str, message: &str) {
        self.lines.lock().unwrap().push(format!("{} {}", level, message));
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Lines logged at `level` (DEBUG, INFO, WARN, ERROR, SECTION, or a custom tag)
    pub fn count(&self, level: &str) -> usize {
        let prefix = format!("{} ", level);
        self.lines().iter().filter(|l| l.starts_with(&prefix)).count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push("DEBUG", message);
    }

    fn info(&self, message: &str) {
        self.push("INFO", message);
    }

    fn warn(&self, message: &str) {
        self.push("WARN", message);
    }

    fn error(&self, message: &str) {
        self.push("ERROR", message);
    }

    fn custom(&self, tag: &str, message: &str) {
        self.push(tag, message);
    }

    fn section(&self, title: &str) {
        self.push("SECTION", title);
    }
}

/// What a `RecordingResponder` was asked to send
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Reply(Reply),
    Defer(bool),
    Edit(String),
}

pub struct RecordingResponder {
    sent: Mutex<Vec<Sent>>,
    acknowledged: AtomicBool,
    reject: bool,
}

impl RecordingResponder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { sent: Mutex::new(Vec::new()), acknowledged: AtomicBool::new(false), reject: false })
    }

    /// Responder whose every call fails, as if the interaction expired
    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self { sent: Mutex::new(Vec::new()), acknowledged: AtomicBool::new(false), reject: true })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent, acknowledges: bool) -> Result<(), BotError> {
        if self.reject {
            return Err(BotError::Discord("Unknown interaction".to_string()));
        }
        self.sent.lock().unwrap().push(sent);
        if acknowledges {
            self.acknowledged.store(true, Ordering::SeqCst);
        }
        Ok(())
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    async fn reply(&self, reply: Reply) -> Result<(), BotError> {
        self.record(Sent::Reply(reply), true)
    }

    async fn defer(&self, ephemeral: bool) -> Result<(), BotError> {
        self.record(Sent::Defer(ephemeral), true)
    }

    async fn edit_reply(&self, content: &str) -> Result<(), BotError> {
        self.record(Sent::Edit(content.to_string()), false)
    }
}

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Ok,
    Fail,
    DeferThenFail,
    Panic,
}

/// Slash command with canned behavior, used for both `execute` and `select`
#[derive(Clone)]
pub struct StubCommand {
    name: String,
    behavior: Behavior,
    components: Vec<String>,
}

impl StubCommand {
    fn with_behavior(name: &str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self { name: name.to_string(), behavior, components: Vec::new() })
    }

    /// Replies "ok"
    pub fn ok(name: &str) -> Arc<Self> {
        Self::with_behavior(name, Behavior::Ok)
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Self::with_behavior(name, Behavior::Fail)
    }

    pub fn defer_then_fail(name: &str) -> Arc<Self> {
        Self::with_behavior(name, Behavior::DeferThenFail)
    }

    pub fn panicking(name: &str) -> Arc<Self> {
        Self::with_behavior(name, Behavior::Panic)
    }

    pub fn with_components(self: Arc<Self>, ids: &[&str]) -> Arc<Self> {
        let mut stub = (*self).clone();
        stub.components = ids.iter().map(|id| id.to_string()).collect();
        Arc::new(stub)
    }

    async fn run(&self, interaction: &Interaction) -> Result<(), BotError> {
        match self.behavior {
            Behavior::Ok => interaction.reply(Reply::new("ok")).await,
            Behavior::Fail => Err(BotError::Internal("stub failure".to_string())),
            Behavior::DeferThenFail => {
                interaction.defer(true).await?;
                Err(BotError::Internal("stub failure after defer".to_string()))
            }
            Behavior::Panic => panic!("stub command panicked"),
        }
    }
}

#[async_trait]
impl SlashCommand for StubCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new(&self.name, "Stub command")
    }

    fn components(&self) -> Vec<String> {
        self.components.clone()
    }

    async fn execute(&self, interaction: &Interaction, _client: &Arc<BotClient>) -> Result<(), BotError> {
        self.run(interaction).await
    }

    async fn select(&self, interaction: &Interaction, _values: &[String], _client: &Arc<BotClient>) -> Result<(), BotError> {
        self.run(interaction).await
    }
}

/// Task counting its starts and completed runs, optionally taking a while
#[derive(Default)]
pub struct CountingTask {
    started: AtomicUsize,
    completed: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingTask {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self { delay: Some(delay), ..Default::default() })
    }

    /// Completed runs
    pub fn count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackgroundTask for CountingTask {
    async fn execute(&self, _client: &Arc<BotClient>) -> Result<(), BotError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FailingTask;

impl FailingTask {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl BackgroundTask for FailingTask {
    async fn execute(&self, _client: &Arc<BotClient>) -> Result<(), BotError> {
        Err(BotError::Internal("stub task failure".to_string()))
    }
}

/// Event handler that only counts calls
#[derive(Default)]
pub struct NoopEvent {
    calls: AtomicUsize,
}

impl NoopEvent {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventHandler for NoopEvent {
    async fn execute(&self, _event: &BotEvent, _client: &Arc<BotClient>) -> Result<(), BotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct StubRoute;

impl StubRoute {
    /// Factory for a router answering `GET /` with "stub"
    pub fn factory() -> RouteFactory {
        Arc::new(|_client: Arc<BotClient>, _logger: Arc<dyn Logger>| -> axum::Router {
            axum::Router::new().route("/", axum::routing::get(|| async { "stub" }))
        })
    }
}

/// Discord call recorded by `RecordingDiscord`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscordCall {
    SetActivity(String),
    SendMessage(u64, String),
    StartStage(u64, String),
    SetStageTopic(u64, String),
    EndStage(u64),
}

#[derive(Default)]
pub struct RecordingDiscord {
    calls: Mutex<Vec<DiscordCall>>,
    fail_next: AtomicBool,
}

impl RecordingDiscord {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<DiscordCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Make the next call fail without being recorded
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: DiscordCall) -> Result<(), BotError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(BotError::Discord("Missing Permissions".to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl Discord for RecordingDiscord {
    async fn set_activity(&self, text: &str) -> Result<(), BotError> {
        self.record(DiscordCall::SetActivity(text.to_string()))
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<(), BotError> {
        self.record(DiscordCall::SendMessage(channel_id, content.to_string()))
    }

    async fn start_stage(&self, channel_id: u64, topic: &str) -> Result<(), BotError> {
        self.record(DiscordCall::StartStage(channel_id, topic.to_string()))
    }

    async fn set_stage_topic(&self, channel_id: u64, topic: &str) -> Result<(), BotError> {
        self.record(DiscordCall::SetStageTopic(channel_id, topic.to_string()))
    }

    async fn end_stage(&self, channel_id: u64) -> Result<(), BotError> {
        self.record(DiscordCall::EndStage(channel_id))
    }
}

/// Stream source that always reports the same status
pub struct FixedStream(pub StreamStatus);

#[async_trait]
impl StreamStatusSource for FixedStream {
    async fn fetch(&self) -> Result<StreamStatus, BotError> {
        Ok(self.0.clone())
    }
}
