//! Notification records and the outbound message tuple

mod filter;
mod seen;

pub use filter::AppFilter;
pub use seen::{SeenSet, DEFAULT_SEEN_CAPACITY};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// App name used when the source cannot identify the sender
pub const UNKNOWN_APP: &str = "Unknown App";

/// Body substituted for notifications without text
pub const EMPTY_BODY_PLACEHOLDER: &str = "(No content)";

/// Source-assigned notification identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for NotificationId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A notification observed in the platform store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub app_name: String,
    pub title: String,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Create a notification; a blank app name becomes [`UNKNOWN_APP`]
    pub fn new(
        id: impl Into<NotificationId>,
        app_name: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let app_name = app_name.into();
        let app_name = if app_name.trim().is_empty() {
            UNKNOWN_APP.to_string()
        } else {
            app_name
        };

        Self {
            id: id.into(),
            app_name,
            title: title.into(),
            body: body.into(),
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// True when there is a title or a body worth forwarding
    pub fn has_content(&self) -> bool {
        !self.title.is_empty() || !self.body.is_empty()
    }

    /// Build the tuple handed to delivery providers
    pub fn to_message(&self) -> OutboundMessage {
        OutboundMessage {
            title: self.title.clone(),
            body: self.body.clone(),
            source_app: Some(self.app_name.clone()),
        }
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NotificationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The (title, body, source-app) tuple accepted by every provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub title: String,
    pub body: String,
    pub source_app: Option<String>,
}

impl OutboundMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            source_app: None,
        }
    }

    pub fn with_source_app(mut self, app: impl Into<String>) -> Self {
        self.source_app = Some(app.into());
        self
    }

    pub fn body_or_placeholder(&self) -> &str {
        if self.body.is_empty() {
            EMPTY_BODY_PLACEHOLDER
        } else {
            &self.body
        }
    }
}
