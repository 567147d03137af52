//! Environment variable config overlay
//!
//! Recognised variables:
//!
//! | Variable                   | Key                          |
//! |----------------------------|------------------------------|
//! | `POLL_INTERVAL`            | `poll_interval`              |
//! | `WHITELIST_APPS`           | `filter.whitelist_apps`      |
//! | `IGNORED_APPS`             | `filter.ignored_apps`        |
//! | `ENABLE_FCM`               | `fcm.enabled`                |
//! | `FCM_SERVICE_ACCOUNT_FILE` | `fcm.service_account_file`   |
//! | `FCM_TOPIC`                | `fcm.topic`                  |
//! | `ENABLE_PUSHBULLET`        | `pushbullet.enabled`         |
//! | `PUSHBULLET_API_TOKEN`     | `pushbullet.api_token`       |
//! | `ENABLE_NTFY`              | `ntfy.enabled`               |
//! | `NTFY_SERVER_URL`          | `ntfy.server_url`            |
//! | `NTFY_TOPIC`               | `ntfy.topic`                 |
//! | `NTFY_USERNAME`            | `ntfy.username`              |
//! | `NTFY_PASSWORD`            | `ntfy.password`              |

use crate::domain::config::{AppConfig, FcmConfig, FilterConfig, NtfyConfig, PushbulletConfig};
use crate::domain::notification::AppFilter;

/// Interpret a boolean flag; only `true`, `1`, `yes` and `on` are truthy
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Build an overlay from the process environment
pub fn env_config() -> AppConfig {
    env_config_from(|name| std::env::var(name).ok())
}

/// Build an overlay from an arbitrary variable lookup.
/// Empty values count as unset.
pub fn env_config_from<F>(lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let flag = |name: &str| get(name).map(|v| parse_flag(&v));
    let list = |name: &str| get(name).map(|v| AppFilter::parse_list(&v));

    let filter = FilterConfig {
        whitelist_apps: list("WHITELIST_APPS"),
        ignored_apps: list("IGNORED_APPS"),
    };
    let fcm = FcmConfig {
        enabled: flag("ENABLE_FCM"),
        service_account_file: get("FCM_SERVICE_ACCOUNT_FILE"),
        topic: get("FCM_TOPIC"),
    };
    let pushbullet = PushbulletConfig {
        enabled: flag("ENABLE_PUSHBULLET"),
        api_token: get("PUSHBULLET_API_TOKEN"),
    };
    let ntfy = NtfyConfig {
        enabled: flag("ENABLE_NTFY"),
        server_url: get("NTFY_SERVER_URL"),
        topic: get("NTFY_TOPIC"),
        username: get("NTFY_USERNAME"),
        password: get("NTFY_PASSWORD"),
    };

    AppConfig {
        poll_interval: get("POLL_INTERVAL"),
        filter: Some(filter).filter(|f| *f != FilterConfig::default()),
        fcm: Some(fcm).filter(|f| *f != FcmConfig::default()),
        pushbullet: Some(pushbullet).filter(|p| *p != PushbulletConfig::default()),
        ntfy: Some(ntfy).filter(|n| *n != NtfyConfig::default()),
        ..Default::default()
    }
}
