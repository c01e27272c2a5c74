use crate::error::{GreenlabError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const DEFAULT_RECENT_PROJECTS_LIMIT: usize = 5;
pub const DEFAULT_MAX_QUANTITY: u32 = 999;

/// Configuration for greenlab, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GreenlabConfig {
    /// How many projects the "recent" view shows
    #[serde(default = "default_recent_projects_limit")]
    pub recent_projects_limit: usize,

    /// Largest quantity a single project line may hold
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

fn default_recent_projects_limit() -> usize {
    DEFAULT_RECENT_PROJECTS_LIMIT
}

fn default_max_quantity() -> u32 {
    DEFAULT_MAX_QUANTITY
}

impl Default for GreenlabConfig {
    fn default() -> Self {
        Self {
            recent_projects_limit: DEFAULT_RECENT_PROJECTS_LIMIT,
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }
}

impl GreenlabConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GreenlabError::Io)?;
        let config: GreenlabConfig =
            serde_json::from_str(&content).map_err(GreenlabError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(GreenlabError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(GreenlabError::Serialization)?;
        fs::write(config_path, content).map_err(GreenlabError::Io)?;
        Ok(())
    }

    /// Set a value by its CLI key name (`recent-limit`, `max-quantity`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "recent-limit" => {
                self.recent_projects_limit = value
                    .parse()
                    .map_err(|_| GreenlabError::Api(format!("Not a count: {}", value)))?;
            }
            "max-quantity" => {
                let max: u32 = value
                    .parse()
                    .map_err(|_| GreenlabError::Api(format!("Not a quantity: {}", value)))?;
                if max == 0 {
                    return Err(GreenlabError::Api("max-quantity must be at least 1".into()));
                }
                self.max_quantity = max;
            }
            other => return Err(GreenlabError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// Read a value by its CLI key name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "recent-limit" => Some(self.recent_projects_limit.to_string()),
            "max-quantity" => Some(self.max_quantity.to_string()),
            _ => None,
        }
    }

    pub const KEYS: [&'static str; 2] = ["recent-limit", "max-quantity"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GreenlabConfig::default();
        assert_eq!(config.recent_projects_limit, 5);
        assert_eq!(config.max_quantity, 999);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = GreenlabConfig::load(dir.path()).unwrap();
        assert_eq!(config, GreenlabConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");

        let mut config = GreenlabConfig::default();
        config.set("max-quantity", "250").unwrap();
        config.save(&nested).unwrap();

        let loaded = GreenlabConfig::load(&nested).unwrap();
        assert_eq!(loaded.max_quantity, 250);
        assert_eq!(loaded.recent_projects_limit, 5);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"recent_projects_limit": 3}"#).unwrap();
        let loaded = GreenlabConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.recent_projects_limit, 3);
        assert_eq!(loaded.max_quantity, DEFAULT_MAX_QUANTITY);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = GreenlabConfig::default();
        assert!(config.set("max-quantity", "0").is_err());
        assert!(config.set("max-quantity", "lots").is_err());
        assert!(config.set("colour", "green").is_err());
        assert_eq!(config, GreenlabConfig::default());
    }

    #[test]
    fn test_get_by_key() {
        let config = GreenlabConfig::default();
        assert_eq!(config.get("recent-limit").as_deref(), Some("5"));
        assert_eq!(config.get("nope"), None);
    }
}
