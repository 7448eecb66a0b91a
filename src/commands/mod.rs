//! Built-in slash commands
//!
//! Each command is selected by a manifest under `commands/`; the catalog key
//! matches the command name.

pub mod ping;
pub mod playlist;
pub mod status;
pub mod suggest;
pub mod topic;

use std::sync::Arc;

use crate::plugins::descriptor::Module;

/// Command modules shipped with the bot
pub fn catalog() -> Vec<(&'static str, Module)> {
    vec![
        ("ping", Module::command(Arc::new(ping::Ping))),
        ("playlist", Module::command(Arc::new(playlist::PlaylistCommand))),
        ("status", Module::command(Arc::new(status::Status))),
        ("suggest", Module::command(Arc::new(suggest::Suggest))),
        ("topic", Module::command(Arc::new(topic::Topic))),
    ]
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("ééééé", 3).chars().count(), 3);
    }
}
