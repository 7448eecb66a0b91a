//! Plugin descriptors - Loose import results and their validated form

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::ShapeError;
use super::trait_def::{BackgroundTask, Category, EventHandler, RouteFactory, SlashCommand, UtilInit};

static COMMAND_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-_a-z0-9]{1,32}$").expect("command name pattern is valid")
});

/// What an imported module exports
#[derive(Clone)]
pub enum Export {
    Command(Arc<dyn SlashCommand>),
    Event(Arc<dyn EventHandler>),
    Task(Arc<dyn BackgroundTask>),
    Route(RouteFactory),
    Util(Option<UtilInit>),
}

impl Export {
    pub fn kind(&self) -> &'static str {
        match self {
            Export::Command(_) => "command",
            Export::Event(_) => "event",
            Export::Task(_) => "task",
            Export::Route(_) => "route",
            Export::Util(_) => "util",
        }
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Export::{}", self.kind())
    }
}

/// A module as produced by an importer, before validation.
///
/// Every field is optional; `validate` decides whether the combination is
/// acceptable for the directory it was found in.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub name: Option<String>,
    pub once: Option<bool>,
    /// Repeat period in milliseconds
    pub interval: Option<u64>,
    pub export: Option<Export>,
}

impl Module {
    pub fn command(handler: Arc<dyn SlashCommand>) -> Self {
        Self {
            name: Some(handler.definition().name),
            export: Some(Export::Command(handler)),
            ..Default::default()
        }
    }

    pub fn event(name: impl Into<String>, once: bool, handler: Arc<dyn EventHandler>) -> Self {
        Self {
            name: Some(name.into()),
            once: Some(once),
            export: Some(Export::Event(handler)),
            ..Default::default()
        }
    }

    pub fn task(name: impl Into<String>, interval: Option<u64>, job: Arc<dyn BackgroundTask>) -> Self {
        Self {
            name: Some(name.into()),
            interval,
            export: Some(Export::Task(job)),
            ..Default::default()
        }
    }

    pub fn route(factory: RouteFactory) -> Self {
        Self {
            export: Some(Export::Route(factory)),
            ..Default::default()
        }
    }

    pub fn util(init: Option<UtilInit>) -> Self {
        Self {
            export: Some(Export::Util(init)),
            ..Default::default()
        }
    }
}

/// A module that passed validation for its category
#[derive(Clone)]
pub enum PluginDescriptor {
    Command {
        name: String,
        handler: Arc<dyn SlashCommand>,
    },
    Event {
        name: String,
        once: bool,
        handler: Arc<dyn EventHandler>,
    },
    Task {
        name: String,
        job: Arc<dyn BackgroundTask>,
        interval: Option<Duration>,
    },
    Route {
        factory: RouteFactory,
    },
    Util,
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginDescriptor::Command { name, .. } => f.debug_struct("Command").field("name", name).finish(),
            PluginDescriptor::Event { name, once, .. } => {
                f.debug_struct("Event").field("name", name).field("once", once).finish()
            }
            PluginDescriptor::Task { name, interval, .. } => {
                f.debug_struct("Task").field("name", name).field("interval", interval).finish()
            }
            PluginDescriptor::Route { .. } => f.write_str("Route"),
            PluginDescriptor::Util => f.write_str("Util"),
        }
    }
}

fn required_name(module: &Module) -> Result<String, ShapeError> {
    match module.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ShapeError::MissingName),
    }
}

fn wrong_kind(expected: Category, export: &Export) -> ShapeError {
    ShapeError::WrongKind {
        expected: expected.as_str(),
        found: export.kind(),
    }
}

/// Check a module against the shape its category requires
pub fn validate(category: Category, module: Module) -> Result<PluginDescriptor, ShapeError> {
    let export = module.export.clone().ok_or(ShapeError::MissingExport)?;

    match (category, export) {
        (Category::Command, Export::Command(handler)) => {
            let name = required_name(&module)?;
            if !COMMAND_NAME.is_match(&name) {
                return Err(ShapeError::InvalidName(name));
            }
            Ok(PluginDescriptor::Command { name, handler })
        }
        (Category::Event, Export::Event(handler)) => Ok(PluginDescriptor::Event {
            name: required_name(&module)?,
            once: module.once.unwrap_or(false),
            handler,
        }),
        (Category::Task, Export::Task(job)) => {
            let name = required_name(&module)?;
            let interval = match module.interval {
                Some(0) => return Err(ShapeError::ZeroInterval),
                Some(ms) => Some(Duration::from_millis(ms)),
                None => None,
            };
            Ok(PluginDescriptor::Task { name, job, interval })
        }
        (Category::Route, Export::Route(factory)) => Ok(PluginDescriptor::Route { factory }),
        // Utils are loaded for their side effects; any export will do
        (Category::Util, _) => Ok(PluginDescriptor::Util),
        (expected, export) => Err(wrong_kind(expected, &export)),
    }
}
