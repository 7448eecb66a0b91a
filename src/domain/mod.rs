//! Domain layer - Core business objects and the seams to the outside world
//!
//! This layer contains:
//! - Entities: Interactions, events, playlists, suggestions
//! - Traits: Abstractions for infrastructure (Discord, Responder, Store, Logger)

pub mod entities;
pub mod traits;
