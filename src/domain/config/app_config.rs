//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::interval::Interval;
use crate::domain::notification::{AppFilter, DEFAULT_SEEN_CAPACITY};
use crate::domain::provider::SourceKind;

pub const DEFAULT_DUNST_COMMAND: &str = "dunstctl";
pub const DEFAULT_FCM_SERVICE_ACCOUNT_FILE: &str = "service-account.json";
pub const DEFAULT_TOPIC: &str = "desktop_notifications";
pub const DEFAULT_NTFY_SERVER_URL: &str = "https://ntfy.sh";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Field-wise merge where `other` wins for every value it sets.
trait Merge {
    fn merge(self, other: Self) -> Self;
}

fn merge_section<T: Merge>(base: Option<T>, other: Option<T>) -> Option<T> {
    match (base, other) {
        (None, None) => None,
        (Some(b), None) => Some(b),
        (None, Some(o)) => Some(o),
        (Some(b), Some(o)) => Some(b.merge(o)),
    }
}

/// Where notifications are read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub kind: Option<String>,
    pub snapshot_path: Option<String>,
    pub dunst_command: Option<String>,
}

impl Merge for SourceConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            kind: other.kind.or(self.kind),
            snapshot_path: other.snapshot_path.or(self.snapshot_path),
            dunst_command: other.dunst_command.or(self.dunst_command),
        }
    }
}

/// Source-application filter rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub whitelist_apps: Option<Vec<String>>,
    pub ignored_apps: Option<Vec<String>>,
}

impl Merge for FilterConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            whitelist_apps: other.whitelist_apps.or(self.whitelist_apps),
            ignored_apps: other.ignored_apps.or(self.ignored_apps),
        }
    }
}

/// Firebase Cloud Messaging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FcmConfig {
    pub enabled: Option<bool>,
    pub service_account_file: Option<String>,
    pub topic: Option<String>,
}

impl Merge for FcmConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            enabled: other.enabled.or(self.enabled),
            service_account_file: other.service_account_file.or(self.service_account_file),
            topic: other.topic.or(self.topic),
        }
    }
}

/// Pushbullet settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushbulletConfig {
    pub enabled: Option<bool>,
    pub api_token: Option<String>,
}

impl Merge for PushbulletConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            enabled: other.enabled.or(self.enabled),
            api_token: other.api_token.or(self.api_token),
        }
    }
}

/// ntfy settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NtfyConfig {
    pub enabled: Option<bool>,
    pub server_url: Option<String>,
    pub topic: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Merge for NtfyConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            enabled: other.enabled.or(self.enabled),
            server_url: other.server_url.or(self.server_url),
            topic: other.topic.or(self.topic),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Merge for LogConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            level: other.level.or(self.level),
            file: other.file.or(self.file),
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub poll_interval: Option<String>,
    pub seen_capacity: Option<usize>,
    pub skip_backlog: Option<bool>,
    pub source: Option<SourceConfig>,
    pub filter: Option<FilterConfig>,
    pub fcm: Option<FcmConfig>,
    pub pushbullet: Option<PushbulletConfig>,
    pub ntfy: Option<NtfyConfig>,
    pub log: Option<LogConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            poll_interval: Some(Interval::default_poll().to_string()),
            seen_capacity: Some(DEFAULT_SEEN_CAPACITY),
            skip_backlog: Some(false),
            source: Some(SourceConfig {
                kind: Some(SourceKind::default().to_string()),
                snapshot_path: None,
                dunst_command: Some(DEFAULT_DUNST_COMMAND.to_string()),
            }),
            filter: Some(FilterConfig {
                whitelist_apps: Some(Vec::new()),
                ignored_apps: Some(Vec::new()),
            }),
            fcm: Some(FcmConfig {
                enabled: Some(true),
                service_account_file: Some(DEFAULT_FCM_SERVICE_ACCOUNT_FILE.to_string()),
                topic: Some(DEFAULT_TOPIC.to_string()),
            }),
            pushbullet: Some(PushbulletConfig {
                enabled: Some(true),
                api_token: None,
            }),
            ntfy: Some(NtfyConfig {
                enabled: Some(true),
                server_url: Some(DEFAULT_NTFY_SERVER_URL.to_string()),
                topic: Some(DEFAULT_TOPIC.to_string()),
                username: None,
                password: None,
            }),
            log: Some(LogConfig {
                level: Some(DEFAULT_LOG_LEVEL.to_string()),
                file: None,
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            poll_interval: other.poll_interval.or(self.poll_interval),
            seen_capacity: other.seen_capacity.or(self.seen_capacity),
            skip_backlog: other.skip_backlog.or(self.skip_backlog),
            source: merge_section(self.source, other.source),
            filter: merge_section(self.filter, other.filter),
            fcm: merge_section(self.fcm, other.fcm),
            pushbullet: merge_section(self.pushbullet, other.pushbullet),
            ntfy: merge_section(self.ntfy, other.ntfy),
            log: merge_section(self.log, other.log),
        }
    }

    /// Get poll interval, or default if not set/invalid
    pub fn poll_interval_or_default(&self) -> Interval {
        self.poll_interval
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn seen_capacity_or_default(&self) -> usize {
        self.seen_capacity.unwrap_or(DEFAULT_SEEN_CAPACITY)
    }

    pub fn skip_backlog_or_default(&self) -> bool {
        self.skip_backlog.unwrap_or(false)
    }

    /// Get source kind, or dunst if not set/invalid
    pub fn source_kind_or_default(&self) -> SourceKind {
        self.source
            .as_ref()
            .and_then(|s| s.kind.as_ref())
            .and_then(|k| k.parse().ok())
            .unwrap_or_default()
    }

    pub fn snapshot_path(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.snapshot_path.as_deref())
    }

    pub fn dunst_command_or_default(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.dunst_command.as_deref())
            .unwrap_or(DEFAULT_DUNST_COMMAND)
    }

    /// Build the application filter from the configured lists
    pub fn app_filter(&self) -> AppFilter {
        let filter = self.filter.clone().unwrap_or_default();
        AppFilter::new(
            filter.whitelist_apps.unwrap_or_default(),
            filter.ignored_apps.unwrap_or_default(),
        )
    }

    /// Providers are enabled unless explicitly switched off
    pub fn fcm_enabled_or_default(&self) -> bool {
        self.fcm.as_ref().and_then(|f| f.enabled).unwrap_or(true)
    }

    pub fn fcm_service_account_file_or_default(&self) -> &str {
        self.fcm
            .as_ref()
            .and_then(|f| f.service_account_file.as_deref())
            .unwrap_or(DEFAULT_FCM_SERVICE_ACCOUNT_FILE)
    }

    pub fn fcm_topic_or_default(&self) -> &str {
        self.fcm
            .as_ref()
            .and_then(|f| f.topic.as_deref())
            .unwrap_or(DEFAULT_TOPIC)
    }

    pub fn pushbullet_enabled_or_default(&self) -> bool {
        self.pushbullet
            .as_ref()
            .and_then(|p| p.enabled)
            .unwrap_or(true)
    }

    pub fn pushbullet_api_token(&self) -> Option<&str> {
        self.pushbullet
            .as_ref()
            .and_then(|p| p.api_token.as_deref())
    }

    pub fn ntfy_enabled_or_default(&self) -> bool {
        self.ntfy.as_ref().and_then(|n| n.enabled).unwrap_or(true)
    }

    pub fn ntfy_server_url_or_default(&self) -> &str {
        self.ntfy
            .as_ref()
            .and_then(|n| n.server_url.as_deref())
            .unwrap_or(DEFAULT_NTFY_SERVER_URL)
    }

    pub fn ntfy_topic_or_default(&self) -> &str {
        self.ntfy
            .as_ref()
            .and_then(|n| n.topic.as_deref())
            .unwrap_or(DEFAULT_TOPIC)
    }

    /// Basic-auth credentials, only when both halves are non-empty
    pub fn ntfy_credentials(&self) -> Option<(&str, &str)> {
        let ntfy = self.ntfy.as_ref()?;
        let username = ntfy.username.as_deref().filter(|s| !s.is_empty())?;
        let password = ntfy.password.as_deref().filter(|s| !s.is_empty())?;
        Some((username, password))
    }

    pub fn log_level_or_default(&self) -> &str {
        self.log
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log.as_ref().and_then(|l| l.file.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.poll_interval, Some("500ms".to_string()));
        assert_eq!(config.seen_capacity, Some(10_000));
        assert_eq!(config.source_kind_or_default(), SourceKind::Dunst);
        assert_eq!(config.dunst_command_or_default(), "dunstctl");
        assert!(config.fcm_enabled_or_default());
        assert_eq!(config.fcm_topic_or_default(), "desktop_notifications");
        assert_eq!(config.ntfy_server_url_or_default(), "https://ntfy.sh");
        assert!(config.pushbullet_api_token().is_none());
        assert_eq!(config.log_level_or_default(), "info");
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.poll_interval.is_none());
        assert!(config.source.is_none());
        assert!(config.fcm.is_none());
        assert!(config.log.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            poll_interval: Some("1s".to_string()),
            seen_capacity: Some(50),
            ..Default::default()
        };
        let other = AppConfig {
            poll_interval: Some("2s".to_string()),
            seen_capacity: None,
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.poll_interval, Some("2s".to_string()));
        assert_eq!(merged.seen_capacity, Some(50));
    }

    #[test]
    fn merge_sections_field_by_field() {
        let base = AppConfig {
            ntfy: Some(NtfyConfig {
                server_url: Some("https://ntfy.example.com".to_string()),
                topic: Some("base".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let other = AppConfig {
            ntfy: Some(NtfyConfig {
                topic: Some("override".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.ntfy_server_url_or_default(), "https://ntfy.example.com");
        assert_eq!(merged.ntfy_topic_or_default(), "override");
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            pushbullet: Some(PushbulletConfig {
                enabled: Some(false),
                api_token: Some("o.abcdefghijkl".to_string()),
            }),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert!(!merged.pushbullet_enabled_or_default());
        assert_eq!(merged.pushbullet_api_token(), Some("o.abcdefghijkl"));
    }

    #[test]
    fn poll_interval_falls_back_on_invalid() {
        let config = AppConfig {
            poll_interval: Some("soon".to_string()),
            ..Default::default()
        };
        assert_eq!(config.poll_interval_or_default().as_millis(), 500);
    }

    #[test]
    fn providers_enabled_when_unset() {
        let config = AppConfig::empty();
        assert!(config.fcm_enabled_or_default());
        assert!(config.pushbullet_enabled_or_default());
        assert!(config.ntfy_enabled_or_default());
    }

    #[test]
    fn ntfy_credentials_need_both_parts() {
        let mut config = AppConfig {
            ntfy: Some(NtfyConfig {
                username: Some("alice".to_string()),
                password: Some(String::new()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.ntfy_credentials().is_none());

        if let Some(ref mut ntfy) = config.ntfy {
            ntfy.password = Some("secret".to_string());
        }
        assert_eq!(config.ntfy_credentials(), Some(("alice", "secret")));
    }

    #[test]
    fn app_filter_from_lists() {
        let config = AppConfig {
            filter: Some(FilterConfig {
                whitelist_apps: None,
                ignored_apps: Some(vec!["Spotify".to_string()]),
            }),
            ..Default::default()
        };
        let filter = config.app_filter();
        assert!(!filter.should_forward("Spotify"));
        assert!(filter.should_forward("Slack"));
    }
}
