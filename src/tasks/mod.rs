//! Built-in background tasks

pub mod memory;
pub mod presence;
pub mod registry_summary;

use std::sync::Arc;

use crate::plugins::descriptor::Module;

/// Default period of the presence refresh, in milliseconds
pub const PRESENCE_INTERVAL_MS: u64 = 60_000;
/// Default period of the memory report, in milliseconds
pub const MEMORY_INTERVAL_MS: u64 = 300_000;

/// Task modules shipped with the bot. Manifests may override `interval`.
pub fn catalog() -> Vec<(&'static str, Module)> {
    vec![
        ("memory", Module::task("memory", Some(MEMORY_INTERVAL_MS), Arc::new(memory::MemoryReport))),
        ("presence", Module::task("presence", Some(PRESENCE_INTERVAL_MS), Arc::new(presence::Presence))),
        ("registry_summary", Module::task("registry_summary", None, Arc::new(registry_summary::RegistrySummary))),
    ]
}
