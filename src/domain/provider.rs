//! Delivery provider and notification source identifiers

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{InvalidProviderError, InvalidSourceKindError};

/// All supported delivery providers
pub const ALL_PROVIDERS: &[ProviderKind] =
    &[ProviderKind::Fcm, ProviderKind::Pushbullet, ProviderKind::Ntfy];

/// Remote push backends a notification can be delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Firebase Cloud Messaging, topic based
    Fcm,
    /// Pushbullet, device linked
    Pushbullet,
    /// ntfy HTTP pub/sub
    Ntfy,
}

impl ProviderKind {
    /// Human-readable label used in logs and summaries
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fcm => "FCM",
            Self::Pushbullet => "Pushbullet",
            Self::Ntfy => "Ntfy",
        }
    }

    /// Config section / identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcm => "fcm",
            Self::Pushbullet => "pushbullet",
            Self::Ntfy => "ntfy",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = InvalidProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcm" => Ok(Self::Fcm),
            "pushbullet" => Ok(Self::Pushbullet),
            "ntfy" => Ok(Self::Ntfy),
            _ => Err(InvalidProviderError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where notifications are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    /// The dunst notification daemon's history (`dunstctl history`)
    #[default]
    Dunst,
    /// A JSON snapshot file maintained by an external bridge
    Snapshot,
}

impl SourceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dunst => "dunst",
            Self::Snapshot => "snapshot",
        }
    }
}

impl FromStr for SourceKind {
    type Err = InvalidSourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dunst" => Ok(Self::Dunst),
            "snapshot" => Ok(Self::Snapshot),
            _ => Err(InvalidSourceKindError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
