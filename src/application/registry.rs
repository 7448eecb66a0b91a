//! Registry - Name-keyed handler lookup filled by the plugin loader

use std::collections::HashMap;
use std::sync::RwLock;
use crate::application::errors::BotError;

/// Registry mapping names to handlers.
///
/// Entries are added by the loader at startup and only read afterwards;
/// there is no removal.
pub struct Registry<T: Clone> {
    entries: RwLock<HashMap<String, T>>,
}

impl<T: Clone> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler, returning the one it replaced (last write wins)
    pub fn insert(&self, name: impl Into<String>, handler: T) -> Result<Option<T>, BotError> {
        let mut entries = self.entries.write()
            .map_err(|_| BotError::Internal("Registry lock poisoned".to_string()))?;
        Ok(entries.insert(name.into(), handler))
    }

    /// Get a handler by name
    pub fn get(&self, name: &str) -> Result<Option<T>, BotError> {
        let entries = self.entries.read()
            .map_err(|_| BotError::Internal("Registry lock poisoned".to_string()))?;
        Ok(entries.get(name).cloned())
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read()
            .ok()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read()
            .ok()
            .map(|e| e.contains_key(name))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.read()
            .ok()
            .map(|e| e.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_previous_entry() {
        let registry: Registry<u32> = Registry::new();
        assert_eq!(registry.insert("ping", 1).unwrap(), None);
        assert_eq!(registry.insert("ping", 2).unwrap(), Some(1));
        assert_eq!(registry.get("ping").unwrap(), Some(2));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_sorted() {
        let registry: Registry<u32> = Registry::new();
        registry.insert("topic", 1).unwrap();
        registry.insert("ping", 2).unwrap();
        assert_eq!(registry.names(), vec!["ping".to_string(), "topic".to_string()]);
        assert!(registry.contains("topic"));
        assert!(registry.get("missing").unwrap().is_none());
    }
}
