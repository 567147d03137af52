//! JSON snapshot file source adapter
//!
//! Reads a file that an external bridge rewrites with the current contents of
//! a notification store:
//!
//! ```json
//! [{"id": "42", "app_name": "Mail", "title": "Inbox", "body": "2 new", "created_at": "2024-05-01T10:00:00Z"}]
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::fs;

use crate::application::ports::{NotificationSource, SourceError, SourceStatus};
use crate::domain::notification::Notification;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(u64),
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Text(s) => s,
            RecordId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotRecord {
    id: RecordId,
    #[serde(default)]
    app_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    created_at: Option<DateTime<Utc>>,
}

/// Notification source backed by a JSON snapshot file
pub struct SnapshotFileSource {
    path: PathBuf,
}

impl SnapshotFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_snapshot(content: &str) -> Result<Vec<Notification>, SourceError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<SnapshotRecord> =
            serde_json::from_str(content).map_err(|e| SourceError::ParseError(e.to_string()))?;

        Ok(records
            .into_iter()
            .map(|r| {
                let notification = Notification::new(String::from(r.id), r.app_name, r.title, r.body);
                match r.created_at {
                    Some(ts) => notification.with_created_at(ts),
                    None => notification,
                }
            })
            .collect())
    }
}

#[async_trait]
impl NotificationSource for SnapshotFileSource {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn probe(&self) -> Result<SourceStatus, SourceError> {
        if self.path.exists() {
            Ok(SourceStatus::Available)
        } else {
            Ok(SourceStatus::Unavailable(format!(
                "snapshot file not found: {}",
                self.path.display()
            )))
        }
    }

    async fn fetch(&self) -> Result<Vec<Notification>, SourceError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(SourceError::AccessDenied(e.to_string()))
            }
            Err(e) => return Err(SourceError::ReadFailed(e.to_string())),
        };

        Self::parse_snapshot(&content)
    }
}
