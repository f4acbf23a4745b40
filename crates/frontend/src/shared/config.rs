//! Client configuration.
//!
//! Defaults are embedded as TOML; a per-browser override document may be kept
//! in local storage under [`CONFIG_STORAGE_KEY`]. Keys present in the override
//! replace the defaults, everything else is inherited.

use crate::search::session::OverlapPolicy;
use crate::shared::storage::{BrowserStorage, SessionStore};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_STORAGE_KEY: &str = "clientConfig";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
# empty means same origin as the page
base_url = ""

[search]
page_size = 100
overlap_policy = "last_response_wins"

[notifications]
timeout_ms = 5000

[logging]
level = "debug"
"#;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchConfig {
    pub page_size: usize,
    pub overlap_policy: OverlapPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotificationConfig {
    pub timeout_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("search.page_size must be greater than zero")]
    ZeroPageSize,
    #[error("unknown log level: {0}")]
    LogLevel(String),
}

impl ClientConfig {
    /// Build the configuration from the embedded defaults and an optional
    /// override document.
    pub fn from_toml(override_toml: Option<&str>) -> Result<Self, ConfigError> {
        let mut table: toml::Table = DEFAULT_CONFIG.parse()?;
        if let Some(raw) = override_toml {
            let overrides: toml::Table = raw.parse()?;
            merge_tables(&mut table, overrides);
        }
        let config: ClientConfig = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to the defaults when the stored
    /// override is unusable.
    pub fn load() -> Self {
        Self::load_from(&BrowserStorage)
    }

    pub fn load_from<S: SessionStore>(store: &S) -> Self {
        let stored = store.get(CONFIG_STORAGE_KEY);
        match Self::from_toml(stored.as_deref()) {
            Ok(config) => {
                if stored.is_some() {
                    log::info!("Loaded client configuration override");
                }
                config
            }
            Err(e) => {
                log::warn!("Ignoring stored client configuration: {}", e);
                Self::default()
            }
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.logging.level.parse().unwrap_or(log::Level::Debug)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.logging.level.parse::<log::Level>().is_err() {
            return Err(ConfigError::LogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
            },
            search: SearchConfig {
                page_size: 100,
                overlap_policy: OverlapPolicy::LastResponseWins,
            },
            notifications: NotificationConfig { timeout_ms: 5000 },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        }
    }
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStore;

    #[test]
    fn test_default_config_loads() {
        let config = ClientConfig::from_toml(None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.log_level(), log::Level::Debug);
    }

    #[test]
    fn test_override_merges_per_key() {
        let config = ClientConfig::from_toml(Some(
            "[search]\npage_size = 25\n[logging]\nlevel = \"warn\"\n",
        ))
        .unwrap();
        assert_eq!(config.search.page_size, 25);
        assert_eq!(config.search.overlap_policy, OverlapPolicy::LastResponseWins);
        assert_eq!(config.notifications.timeout_ms, 5000);
        assert_eq!(config.log_level(), log::Level::Warn);
    }

    #[test]
    fn test_overlap_policy_override() {
        let config = ClientConfig::from_toml(Some(
            "[search]\noverlap_policy = \"latest_request_wins\"\n",
        ))
        .unwrap();
        assert_eq!(config.search.overlap_policy, OverlapPolicy::LatestRequestWins);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        assert!(matches!(
            ClientConfig::from_toml(Some("[search]\npage_size = 0\n")),
            Err(ConfigError::ZeroPageSize)
        ));
        assert!(matches!(
            ClientConfig::from_toml(Some("[logging]\nlevel = \"loud\"\n")),
            Err(ConfigError::LogLevel(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml(Some("search = [")),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let store = MemoryStore::default();
        store.set(CONFIG_STORAGE_KEY, "[search]\npage_size = -3\n");
        assert_eq!(ClientConfig::load_from(&store), ClientConfig::default());

        store.set(CONFIG_STORAGE_KEY, "[api]\nbase_url = \"http://127.0.0.1:5000\"\n");
        assert_eq!(
            ClientConfig::load_from(&store).api.base_url,
            "http://127.0.0.1:5000"
        );
    }
}
