//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::messaging::DEFAULT_PREFIX;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    /// Prefix for groups without their own
    pub prefix: String,
    /// The bot's own account; its messages are never dispatched
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    Json,
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the json backend, database file for sqlite
    pub path: PathBuf,
}

/// Identity and permissions of the local console user
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub group_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub administrator: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            path: PathBuf::from("./settings"),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            group_id: "console".to_string(),
            channel_id: "console".to_string(),
            user_id: "console-user".to_string(),
            administrator: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "guild-router".to_string(),
                prefix: DEFAULT_PREFIX.to_string(),
                user_id: "guild-router".to_string(),
            },
            storage: StorageConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from `BOT_PREFIX`, `BOT_USER_ID`, `BOT_STORAGE` and `BOT_SETTINGS_PATH`
    pub fn apply_env(&mut self) {
        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Ok(user_id) = std::env::var("BOT_USER_ID") {
            self.bot.user_id = user_id;
        }

        if let Ok(backend) = std::env::var("BOT_STORAGE") {
            match backend.to_lowercase().as_str() {
                "json" => self.storage.backend = StorageBackend::Json,
                "sqlite" => self.storage.backend = StorageBackend::Sqlite,
                "memory" => self.storage.backend = StorageBackend::Memory,
                other => tracing::warn!("Unknown BOT_STORAGE {:?}, keeping {:?}", other, self.storage.backend),
            }
        }

        if let Ok(path) = std::env::var("BOT_SETTINGS_PATH") {
            self.storage.path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue(
                "bot.prefix must not be empty".to_string(),
            ));
        }
        if self.bot.user_id.is_empty() {
            return Err(ConfigError::MissingField("bot.user-id".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert!(config.console.administrator);
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config = Config::from_yaml(
            "bot:\n  name: test\n  prefix: \"?\"\n  user-id: \"42\"\n",
        )
        .unwrap();
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.storage.path, PathBuf::from("./settings"));
        assert_eq!(config.console.group_id, "console");
    }

    #[test]
    fn test_sqlite_backend() {
        let config = Config::from_yaml(
            "bot:\n  name: test\n  prefix: \"!\"\n  user-id: \"42\"\nstorage:\n  backend: sqlite\n  path: bot.db\n",
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let err = Config::from_yaml("bot:\n  name: test\n  prefix: \"\"\n  user-id: \"42\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
