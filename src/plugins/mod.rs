//! Plugin system for radio-bot
//! 
//! Plugin files live in one directory per category. Each file is a YAML
//! manifest naming a built-in module; the loader imports, validates and
//! registers them against the bot client.

pub mod catalog;
pub mod descriptor;
pub mod importer;
pub mod loader;
pub mod manifest;
pub mod trait_def;

pub use catalog::Catalog;
pub use descriptor::{validate, Export, Module, PluginDescriptor};
pub use importer::{ManifestImporter, ModuleImporter};
pub use loader::{LoadReport, PluginLoader};
pub use manifest::PluginManifest;
pub use trait_def::{BackgroundTask, Category, EventHandler, RouteFactory, SlashCommand};
