use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playlist suggestion made by a listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub user_id: u64,
    pub user_name: String,
    pub guild_id: Option<u64>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Suggestion {
    pub fn new(user_id: u64, user_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            user_name: user_name.into(),
            guild_id: None,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_guild(mut self, guild_id: Option<u64>) -> Self {
        self.guild_id = guild_id;
        self
    }
}
