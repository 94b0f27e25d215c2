//! Configuration handling for the settings TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the store path
pub const STORE_ENV: &str = "MAILBOX_SETTINGS_STORE";

const DEFAULT_LOG_FILTER: &str = "mailbox_settings=info";

/// User configuration for the settings TUI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SettingsConfig {
    /// Account store JSON file
    pub store_path: Option<PathBuf>,
    /// Image offered when uploading an avatar
    pub avatar_path: Option<PathBuf>,
    /// tracing filter directive, used when RUST_LOG is unset
    pub log_filter: Option<String>,
    /// Namespace shown first in the alias table
    pub default_namespace: Option<String>,
}

impl SettingsConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "mailbox", "mailbox-settings")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the store and the log file
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Open with `namespace` next time. Returns whether the config changed.
    pub fn remember_namespace(&mut self, namespace: Option<String>) -> bool {
        if namespace.is_none() || namespace == self.default_namespace {
            return false;
        }
        self.default_namespace = namespace;
        true
    }

    /// Resolve the store path: environment, then config, then the data dir
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path_with(std::env::var_os(STORE_ENV).map(PathBuf::from))
    }

    fn store_path_with(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .or_else(|| self.store_path.clone())
            .unwrap_or_else(|| Self::data_dir().join("account.json"))
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = SettingsConfig::default();
        assert!(config.store_path.is_none());
        assert!(config.avatar_path.is_none());
        assert!(config.default_namespace.is_none());
        assert_eq!(config.log_filter(), "mailbox_settings=info");
    }

    #[test]
    fn test_serialization() {
        let config = SettingsConfig {
            store_path: Some(PathBuf::from("/tmp/account.json")),
            avatar_path: Some(PathBuf::from("/tmp/me.png")),
            log_filter: Some("mailbox_settings=debug".to_string()),
            default_namespace: Some("work".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: SettingsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: SettingsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, SettingsConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Unknown fields are ignored
        let json = r#"{"default_namespace": "work", "theme": "dark"}"#;
        let parsed: SettingsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.default_namespace.as_deref(), Some("work"));
    }

    mod store_path {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_env_override_wins() {
            let config = SettingsConfig {
                store_path: Some(PathBuf::from("/from/config.json")),
                ..Default::default()
            };
            let path = config.store_path_with(Some(PathBuf::from("/from/env.json")));
            assert_eq!(path, PathBuf::from("/from/env.json"));
        }

        #[test]
        fn test_config_path_used_without_env() {
            let config = SettingsConfig {
                store_path: Some(PathBuf::from("/from/config.json")),
                ..Default::default()
            };
            assert_eq!(
                config.store_path_with(None),
                PathBuf::from("/from/config.json")
            );
        }

        #[test]
        fn test_falls_back_to_data_dir() {
            let path = SettingsConfig::default().store_path_with(None);
            assert!(path.ends_with("account.json"));
        }
    }

    mod persistence {
        use super::*;
        use pretty_assertions::assert_eq;

        fn temp_config() -> PathBuf {
            std::env::temp_dir()
                .join(format!("mailbox-settings-{}", uuid::Uuid::new_v4()))
                .join("config.json")
        }

        #[test]
        fn test_missing_file_loads_defaults() {
            let config = SettingsConfig::load_from(&temp_config()).unwrap();
            assert_eq!(config, SettingsConfig::default());
        }

        #[test]
        fn test_remembered_namespace_survives_reload() {
            let path = temp_config();
            let mut config = SettingsConfig::default();
            assert!(config.remember_namespace(Some("work".to_string())));
            config.save_to(&path).unwrap();

            let loaded = SettingsConfig::load_from(&path).unwrap();
            assert_eq!(loaded.default_namespace.as_deref(), Some("work"));
            let _ = fs::remove_dir_all(path.parent().unwrap());
        }

        #[test]
        fn test_remember_namespace_skips_no_change() {
            let mut config = SettingsConfig {
                default_namespace: Some("work".to_string()),
                ..Default::default()
            };
            assert!(!config.remember_namespace(Some("work".to_string())));
            assert!(!config.remember_namespace(None));
            assert_eq!(config.default_namespace.as_deref(), Some("work"));
        }
    }

    #[test]
    fn test_load_returns_ok() {
        // Either the user's file or defaults
        assert!(SettingsConfig::load().is_ok());
    }
}
