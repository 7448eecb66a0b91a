//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Discord error: {0}")]
    Discord(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] LoadError),

    #[error("Invalid plugin: {0}")]
    Shape(#[from] ShapeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serenity::Error> for BotError {
    fn from(err: serenity::Error) -> Self {
        BotError::Discord(err.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Network(err.to_string())
    }
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Lock poisoned")]
    Poisoned,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Loader contract violations. These propagate to the caller; per-file
/// problems are reported through `LoadReport` instead.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Route plugins require an HTTP app handle")]
    MissingApp,

    #[error("Plugin directory escapes the base path: {0}")]
    OutsideBase(PathBuf),
}

/// A plugin file could not be imported
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse manifest {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    #[error("Unknown module '{0}'")]
    UnknownModule(String),

    #[error("{0}")]
    Other(String),
}

/// An imported module does not have the shape its category requires
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("module has no export")]
    MissingExport,

    #[error("expected a {expected} export, found {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("module has no name")]
    MissingName,

    #[error("invalid command name '{0}'")]
    InvalidName(String),

    #[error("task interval must be greater than zero")]
    ZeroInterval,

    #[error("'{0}' cannot be used as a route path")]
    InvalidRoutePath(String),
}
