//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::interval::Interval;
use crate::domain::notification::AppFilter;
use crate::domain::provider::SourceKind;

use super::args::{is_valid_config_key, ConfigAction, SECRET_CONFIG_KEYS, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, display_value(key, value)));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match get_value(&config, key) {
        Some(v) => presenter.output(&display_value(key, &v)),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = get_value(&config, key)
            .map(|v| display_value(key, &v))
            .unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

fn section<T: Default>(slot: &mut Option<T>) -> &mut T {
    slot.get_or_insert_with(T::default)
}

/// Parse and store one value, validating it for its key
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let text = || Some(value.to_string());
    let flag = || parse_bool(value).map(Some).ok_or_else(|| {
        invalid(key, "Value must be 'true' or 'false'")
    });
    let list = || Some(AppFilter::parse_list(value));

    match key {
        "poll_interval" => {
            value
                .parse::<Interval>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.poll_interval = text();
        }
        "seen_capacity" => {
            let capacity: usize = value
                .parse()
                .map_err(|_| invalid(key, "Value must be a positive integer"))?;
            if capacity == 0 {
                return Err(invalid(key, "Value must be a positive integer"));
            }
            config.seen_capacity = Some(capacity);
        }
        "skip_backlog" => config.skip_backlog = flag()?,
        "source.kind" => {
            value
                .parse::<SourceKind>()
                .map_err(|e| invalid(key, e.to_string()))?;
            section(&mut config.source).kind = text();
        }
        "source.snapshot_path" => {
            section(&mut config.source).snapshot_path = text();
        }
        "source.dunst_command" => {
            section(&mut config.source).dunst_command = text();
        }
        "filter.whitelist_apps" => {
            section(&mut config.filter).whitelist_apps = list();
        }
        "filter.ignored_apps" => {
            section(&mut config.filter).ignored_apps = list();
        }
        "fcm.enabled" => {
            let enabled = flag()?;
            section(&mut config.fcm).enabled = enabled;
        }
        "fcm.service_account_file" => {
            section(&mut config.fcm).service_account_file = text();
        }
        "fcm.topic" => {
            section(&mut config.fcm).topic = text();
        }
        "pushbullet.enabled" => {
            let enabled = flag()?;
            section(&mut config.pushbullet).enabled = enabled;
        }
        "pushbullet.api_token" => {
            section(&mut config.pushbullet).api_token = text();
        }
        "ntfy.enabled" => {
            let enabled = flag()?;
            section(&mut config.ntfy).enabled = enabled;
        }
        "ntfy.server_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(key, "URL must start with http:// or https://"));
            }
            section(&mut config.ntfy).server_url = text();
        }
        "ntfy.topic" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Topic must not be empty"));
            }
            section(&mut config.ntfy).topic = text();
        }
        "ntfy.username" => {
            section(&mut config.ntfy).username = text();
        }
        "ntfy.password" => {
            section(&mut config.ntfy).password = text();
        }
        "log.level" => {
            let level = value.to_lowercase();
            if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                return Err(invalid(
                    key,
                    format!(
                        "Invalid value '{}'. Valid options: {}",
                        value,
                        VALID_LOG_LEVELS.join(", ")
                    ),
                ));
            }
            section(&mut config.log).level = Some(level);
        }
        "log.file" => {
            section(&mut config.log).file = text();
        }
        _ => return Err(invalid(key, "Unknown key")),
    }

    Ok(())
}

/// Read one value as text; lists are comma-joined
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    let flag = |b: Option<bool>| b.map(|b| b.to_string());
    let list = |l: Option<&Vec<String>>| l.map(|l| l.join(", "));
    let source = config.source.as_ref();
    let filter = config.filter.as_ref();
    let fcm = config.fcm.as_ref();
    let pushbullet = config.pushbullet.as_ref();
    let ntfy = config.ntfy.as_ref();
    let log = config.log.as_ref();

    match key {
        "poll_interval" => config.poll_interval.clone(),
        "seen_capacity" => config.seen_capacity.map(|c| c.to_string()),
        "skip_backlog" => flag(config.skip_backlog),
        "source.kind" => source.and_then(|s| s.kind.clone()),
        "source.snapshot_path" => source.and_then(|s| s.snapshot_path.clone()),
        "source.dunst_command" => source.and_then(|s| s.dunst_command.clone()),
        "filter.whitelist_apps" => list(filter.and_then(|f| f.whitelist_apps.as_ref())),
        "filter.ignored_apps" => list(filter.and_then(|f| f.ignored_apps.as_ref())),
        "fcm.enabled" => flag(fcm.and_then(|f| f.enabled)),
        "fcm.service_account_file" => fcm.and_then(|f| f.service_account_file.clone()),
        "fcm.topic" => fcm.and_then(|f| f.topic.clone()),
        "pushbullet.enabled" => flag(pushbullet.and_then(|p| p.enabled)),
        "pushbullet.api_token" => pushbullet.and_then(|p| p.api_token.clone()),
        "ntfy.enabled" => flag(ntfy.and_then(|n| n.enabled)),
        "ntfy.server_url" => ntfy.and_then(|n| n.server_url.clone()),
        "ntfy.topic" => ntfy.and_then(|n| n.topic.clone()),
        "ntfy.username" => ntfy.and_then(|n| n.username.clone()),
        "ntfy.password" => ntfy.and_then(|n| n.password.clone()),
        "log.level" => log.and_then(|l| l.level.clone()),
        "log.file" => log.and_then(|l| l.file.clone()),
        _ => None,
    }
}

fn display_value(key: &str, value: &str) -> String {
    if SECRET_CONFIG_KEYS.contains(&key) {
        mask_secret(value)
    } else {
        value.to_string()
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Mask a secret for display (show first 4 and last 4 chars)
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
