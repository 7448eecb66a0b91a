//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: Suggestion persistence
//! - Discord: serenity gateway, replies and command deployment
//! - Stream: Live stream status over HTTP
//! - Server: The axum listener for mounted routes

pub mod config;
pub mod database;
pub mod discord;
pub mod logging;
pub mod server;
pub mod stream;
