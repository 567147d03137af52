//! Domain error types

use thiserror::Error;

/// Error when parsing an interval string
#[derive(Debug, Clone, Error)]
#[error("Invalid interval format: \"{input}\". Expected format: <number>ms, <number>s, <number>m, or <number>m<number>s (e.g., 500ms, 2s, 1m30s)")]
pub struct IntervalParseError {
    pub input: String,
}

/// Error when an unknown provider name is given
#[derive(Debug, Clone, Error)]
#[error("Invalid provider: \"{input}\". Valid providers are: fcm, pushbullet, ntfy")]
pub struct InvalidProviderError {
    pub input: String,
}

/// Error when an unknown source kind is given
#[derive(Debug, Clone, Error)]
#[error("Invalid source kind: \"{input}\". Valid kinds are: dunst, snapshot")]
pub struct InvalidSourceKindError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
