//! Catalog - The compile-time list of built-in plugin modules

use std::collections::HashMap;

use super::descriptor::Module;
use super::trait_def::Category;

/// Built-in modules keyed by category and name.
///
/// Plugin files select entries from here, so enabling or disabling a plugin
/// is a matter of adding or removing its file.
#[derive(Default)]
pub struct Catalog {
    entries: HashMap<(Category, String), Module>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every module shipped with the bot
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (key, module) in crate::commands::catalog() {
            catalog.register(Category::Command, key, module);
        }
        for (key, module) in crate::events::catalog() {
            catalog.register(Category::Event, key, module);
        }
        for (key, module) in crate::tasks::catalog() {
            catalog.register(Category::Task, key, module);
        }
        for (key, module) in crate::routes::catalog() {
            catalog.register(Category::Route, key, module);
        }
        for (key, module) in crate::utils::catalog() {
            catalog.register(Category::Util, key, module);
        }
        catalog
    }

    pub fn register(&mut self, category: Category, key: impl Into<String>, module: Module) {
        self.entries.insert((category, key.into()), module);
    }

    pub fn get(&self, category: Category, key: &str) -> Option<&Module> {
        self.entries.get(&(category, key.to_string()))
    }

    /// Keys registered for a category, sorted
    pub fn keys(&self, category: Category) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys()
            .filter(|(c, _)| *c == category)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_covers_every_category() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.keys(Category::Command),
            vec!["ping", "playlist", "status", "suggest", "topic"]
        );
        assert_eq!(
            catalog.keys(Category::Event),
            vec!["interactionCreate", "ready", "voiceStateUpdate"]
        );
        assert_eq!(catalog.keys(Category::Task), vec!["memory", "presence", "registry_summary"]);
        assert_eq!(catalog.keys(Category::Route), vec!["alerts", "health", "playlist", "stage"]);
        assert_eq!(catalog.keys(Category::Util), vec!["panic_hook"]);
    }

    #[test]
    fn test_same_key_in_two_categories() {
        let catalog = Catalog::builtin();
        assert!(catalog.get(Category::Command, "playlist").is_some());
        assert!(catalog.get(Category::Route, "playlist").is_some());
        assert!(catalog.get(Category::Task, "playlist").is_none());
    }
}
