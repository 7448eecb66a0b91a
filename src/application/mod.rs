//! Application layer - Runtime wiring of the bot
//!
//! This layer contains:
//! - Client: the long-lived context shared by every plugin
//! - Registries, events and the scheduler the loader fills at startup
//! - Dispatcher: routes interactions to their handlers
//! - Errors: Domain-specific errors

pub mod errors;
pub mod registry;
pub mod events;
pub mod scheduler;
pub mod client;
pub mod dispatcher;

pub use client::{BotClient, StationState};
pub use dispatcher::InteractionDispatcher;
pub use events::EventEmitter;
pub use registry::Registry;
pub use scheduler::Scheduler;
