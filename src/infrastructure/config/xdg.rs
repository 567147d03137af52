//! XDG config store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "notify-forwarder";

/// Config base directory, falling back to `~/.config` and then the temp dir
fn config_root(config_dir: Option<PathBuf>, home_dir: Option<PathBuf>) -> PathBuf {
    config_dir
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(std::env::temp_dir)
}

/// TOML config file under the XDG config directory
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Store at `$XDG_CONFIG_HOME/notify-forwarder/config.toml`
    pub fn new() -> Self {
        Self {
            path: config_root(dirs::config_dir(), dirs::home_dir())
                .join(APP_DIR)
                .join("config.toml"),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        self.save(&AppConfig::defaults()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_root_falls_back_to_home() {
        let root = config_root(None, Some(PathBuf::from("/home/ada")));
        assert_eq!(root, PathBuf::from("/home/ada/.config"));
    }

    #[test]
    fn config_root_without_home_is_absolute() {
        let root = config_root(None, None);
        assert!(root.is_absolute());
        assert_eq!(root, std::env::temp_dir());
    }

    #[test]
    fn default_path_is_namespaced() {
        let path = XdgConfigStore::new().path();
        assert!(path.to_string_lossy().contains("notify-forwarder"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn parse_nested_sections() {
        let content = r#"
poll_interval = "2s"

[filter]
ignored_apps = ["Slack", "Discord"]

[ntfy]
topic = "laptop"
username = "alice"
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.poll_interval.as_deref(), Some("2s"));
        assert_eq!(config.ntfy_topic_or_default(), "laptop");
        assert!(!config.app_filter().should_forward("Slack"));
        assert!(config.fcm.is_none());
    }

    #[test]
    fn parse_rejects_wrong_types() {
        let err = XdgConfigStore::parse_toml("skip_backlog = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join("config.toml"));

        store.init().await.unwrap();
        assert_eq!(store.load().await.unwrap(), AppConfig::defaults());

        let err = store.init().await.unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }
}
