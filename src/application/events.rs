//! Event emitter - Named listeners for gateway events

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use crate::application::errors::BotError;
use crate::domain::entities::BotEvent;
use crate::domain::traits::Logger;

/// Boxed future returned by listeners
pub type ListenerFuture = Pin<Box<dyn Future<Output = Result<(), BotError>> + Send>>;

/// Listener callback
pub type Listener = Arc<dyn Fn(BotEvent) -> ListenerFuture + Send + Sync>;

struct Entry {
    once: bool,
    listener: Listener,
}

/// Event emitter keyed by event name
pub struct EventEmitter {
    listeners: RwLock<HashMap<String, Vec<Entry>>>,
    logger: Arc<dyn Logger>,
}

impl EventEmitter {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            logger,
        }
    }

    /// Attach a persistent listener
    pub fn on(&self, name: impl Into<String>, listener: Listener) -> Result<(), BotError> {
        self.add(name.into(), listener, false)
    }

    /// Attach a listener that is removed after its first invocation
    pub fn once(&self, name: impl Into<String>, listener: Listener) -> Result<(), BotError> {
        self.add(name.into(), listener, true)
    }

    fn add(&self, name: String, listener: Listener, once: bool) -> Result<(), BotError> {
        let mut listeners = self.listeners.write()
            .map_err(|_| BotError::Internal("Event lock poisoned".to_string()))?;
        listeners.entry(name).or_default().push(Entry { once, listener });
        Ok(())
    }

    /// Number of listeners attached to an event
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.read()
            .ok()
            .and_then(|l| l.get(name).map(|v| v.len()))
            .unwrap_or(0)
    }

    /// Run every listener for the event in registration order.
    ///
    /// Listener errors are logged and do not stop the remaining listeners.
    /// Returns the number of listeners invoked.
    pub async fn emit(&self, event: BotEvent) -> usize {
        let name = event.name();
        let selected: Vec<Listener> = {
            let Ok(mut listeners) = self.listeners.write() else {
                self.logger.error(&format!("Event lock poisoned, dropping '{}'", name));
                return 0;
            };
            let Some(entries) = listeners.get_mut(name) else {
                return 0;
            };
            let selected = entries.iter().map(|e| e.listener.clone()).collect();
            entries.retain(|e| !e.once);
            selected
        };

        for listener in &selected {
            if let Err(e) = listener(event.clone()).await {
                self.logger.error(&format!("Listener for '{}' failed: {}", name, e));
            }
        }
        selected.len()
    }
}
