//! Domain traits - Abstractions for infrastructure

pub mod discord;
pub mod logger;
pub mod responder;
pub mod store;
pub mod stream;

pub use discord::{Discord, OfflineDiscord};
pub use logger::Logger;
pub use responder::Responder;
pub use store::SuggestionStore;
pub use stream::StreamStatusSource;
