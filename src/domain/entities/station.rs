use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single track in the station playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
}

impl Track {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// "Artist - Title", or just the title
    pub fn display(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} - {}", artist, self.title),
            None => self.title.clone(),
        }
    }
}

/// The playlist pushed by the stream-automation tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Playlist {
    fn default() -> Self {
        Self {
            name: "No playlist".to_string(),
            tracks: Vec::new(),
            updated_at: None,
        }
    }
}

/// Live status reported by the stream server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStatus {
    pub online: bool,
    #[serde(default)]
    pub listeners: u32,
    #[serde(default)]
    pub now_playing: Option<String>,
}

impl StreamStatus {
    pub fn offline() -> Self {
        Self {
            online: false,
            listeners: 0,
            now_playing: None,
        }
    }
}
