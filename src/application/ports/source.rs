//! Notification source port interface

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::Notification;

/// Notification source errors
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("{0} not found")]
    CommandNotFound(String),

    #[error("Failed to read notification store: {0}")]
    ReadFailed(String),

    #[error("Failed to parse notification store: {0}")]
    ParseError(String),

    #[error("Notification access denied: {0}")]
    AccessDenied(String),
}

/// Outcome of an access check against the notification store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    /// The store can be read
    Available,
    /// The store exists but refuses access
    Denied(String),
    /// The store is not present on this system
    Unavailable(String),
}

impl SourceStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Denied(reason) => write!(f, "denied ({})", reason),
            Self::Unavailable(reason) => write!(f, "unavailable ({})", reason),
        }
    }
}

/// Port for a pollable platform notification store
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Check whether the store can be read.
    async fn probe(&self) -> Result<SourceStatus, SourceError>;

    /// Read the notifications currently held by the store.
    ///
    /// Returns every record present; deduplication is the caller's job.
    async fn fetch(&self) -> Result<Vec<Notification>, SourceError>;
}

/// Blanket implementation for boxed source types
#[async_trait]
impl NotificationSource for Box<dyn NotificationSource> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    async fn probe(&self) -> Result<SourceStatus, SourceError> {
        self.as_ref().probe().await
    }

    async fn fetch(&self) -> Result<Vec<Notification>, SourceError> {
        self.as_ref().fetch().await
    }
}
