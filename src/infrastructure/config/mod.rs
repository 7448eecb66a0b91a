//! Configuration management

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub plugins: PluginConfig,
    pub api: ApiConfig,
    pub station: StationConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    pub token: Option<String>,
    /// Deploy commands to this guild instead of globally
    pub guild_id: Option<u64>,
    /// Activity shown once the bot is ready
    pub activity: Option<String>,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PluginConfig {
    /// Base path holding the utils/commands/events/tasks/routes directories
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ApiConfig {
    pub enabled: bool,
    pub bind: SocketAddr,
    /// Shared secret expected in the x-api-key header or the `secret` body field
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StationConfig {
    /// JSON endpoint reporting `{online, listeners, now_playing}`
    pub stream_status_url: Option<String>,
    pub stage_channel_id: Option<u64>,
    pub announcements_channel_id: Option<u64>,
    pub suggestions_channel_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "radio-bot".to_string(),
            token: None,
            guild_id: None,
            activity: Some("the station".to_string()),
            log_level: "info".to_string(),
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./plugins"),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            secret: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("radio-bot.db"),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Load the file if it exists, otherwise start from defaults; then apply the environment.
    ///
    /// The flag is `false` when the file was missing. Nothing is logged here
    /// because the subscriber is set up from the loaded config.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<(Self, bool), ConfigError> {
        let path = path.as_ref();
        let found = path.exists();
        let mut config = if found { Self::load(path)? } else { Self::default() };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok((config, found))
    }

    /// Apply overrides from the environment (or any key lookup)
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(token) = var("DISCORD_TOKEN") {
            self.bot.token = Some(token);
        }
        if let Some(guild) = var("DISCORD_GUILD_ID") {
            let id = guild.parse()
                .map_err(|_| ConfigError::InvalidValue(format!("DISCORD_GUILD_ID: {}", guild)))?;
            self.bot.guild_id = Some(id);
        }
        if let Some(secret) = var("API_SECRET") {
            self.api.secret = Some(secret);
        }
        if let Some(bind) = var("API_BIND") {
            self.api.bind = bind.parse()
                .map_err(|_| ConfigError::InvalidValue(format!("API_BIND: {}", bind)))?;
        }
        if let Some(url) = var("STREAM_STATUS_URL") {
            self.station.stream_status_url = Some(url);
        }
        Ok(())
    }

    /// Token required to connect to Discord
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.bot.token.as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("bot.token".to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("station:\n  stage-channel-id: 1234\n").unwrap();
        assert_eq!(config.station.stage_channel_id, Some(1234));
        assert_eq!(config.plugins.directory, PathBuf::from("./plugins"));
        assert!(config.api.enabled);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DISCORD_TOKEN", "abc"),
            ("API_BIND", "127.0.0.1:8080"),
            ("DISCORD_GUILD_ID", "99"),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.token().unwrap(), "abc");
        assert_eq!(config.api.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.bot.guild_id, Some(99));
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = Config::default();
        let err = config.apply_env(|k| (k == "DISCORD_GUILD_ID").then(|| "abc".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_load_or_default_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let (config, found) = Config::load_or_default(dir.path().join("absent.yaml")).unwrap();
        assert!(!found);
        assert_eq!(config.station.stage_channel_id, None);

        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "station:\n  stage-channel-id: 42\n").unwrap();
        let (config, found) = Config::load_or_default(&path).unwrap();
        assert!(found);
        assert_eq!(config.station.stage_channel_id, Some(42));
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(Config::default().token(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        let parsed = Config::parse(&yaml).unwrap();
        assert_eq!(parsed.api.bind, Config::default().api.bind);
        assert!(yaml.contains("stream-status-url"));
    }
}
