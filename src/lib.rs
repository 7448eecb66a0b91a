//! radio-bot - Discord companion bot for an internet radio station
//!
//! Commands, event listeners, background tasks, HTTP routes and utilities
//! are plugins, registered at startup from the plugin directories.

pub mod application;
pub mod commands;
pub mod domain;
pub mod events;
pub mod infrastructure;
pub mod plugins;
pub mod routes;
pub mod tasks;
pub mod utils;

#[cfg(test)]
mod testing;
