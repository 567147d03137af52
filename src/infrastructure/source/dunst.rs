//! dunst history source adapter

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::application::ports::{NotificationSource, SourceError, SourceStatus};
use crate::domain::notification::Notification;

// `dunstctl history` wraps every value as {"type": "<dbus sig>", "data": value}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    data: Vec<Vec<HistoryEntry>>,
}

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    id: Field<i64>,
    appname: Option<Field<String>>,
    summary: Option<Field<String>>,
    body: Option<Field<String>>,
    timestamp: Option<Field<i64>>,
}

#[derive(Debug, Deserialize)]
struct Field<T> {
    data: T,
}

fn field_text(field: Option<Field<String>>) -> String {
    field.map(|f| f.data).unwrap_or_default()
}

/// Reads the notification history kept by the dunst daemon
pub struct DunstHistorySource {
    command: String,
}

impl DunstHistorySource {
    /// Create a source using `dunstctl` from PATH
    pub fn new() -> Self {
        Self::with_command("dunstctl")
    }

    /// Create with a custom dunstctl binary
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    async fn run_history(&self) -> Result<String, SourceError> {
        let output = Command::new(&self.command)
            .arg("history")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SourceError::CommandNotFound(self.command.clone())
                } else {
                    SourceError::ReadFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::ReadFailed(format!(
                "{} history exited with status {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| SourceError::ParseError(e.to_string()))
    }

    /// Parse `dunstctl history` JSON into notifications.
    ///
    /// dunst reuses ids after a restart, so the creation timestamp is folded
    /// into the id when present.
    fn parse_history(json: &str) -> Result<Vec<Notification>, SourceError> {
        let response: HistoryResponse =
            serde_json::from_str(json).map_err(|e| SourceError::ParseError(e.to_string()))?;

        let notifications = response
            .data
            .into_iter()
            .flatten()
            .map(|entry| {
                let id = match &entry.timestamp {
                    Some(ts) => format!("{}:{}", entry.id.data, ts.data),
                    None => entry.id.data.to_string(),
                };
                Notification::new(
                    id,
                    field_text(entry.appname),
                    field_text(entry.summary),
                    field_text(entry.body),
                )
            })
            .collect();

        Ok(notifications)
    }
}

impl Default for DunstHistorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSource for DunstHistorySource {
    fn name(&self) -> &str {
        "dunst"
    }

    async fn probe(&self) -> Result<SourceStatus, SourceError> {
        match self.run_history().await {
            Ok(_) => Ok(SourceStatus::Available),
            Err(SourceError::CommandNotFound(cmd)) => {
                Ok(SourceStatus::Unavailable(format!("{} not found", cmd)))
            }
            Err(SourceError::ReadFailed(reason)) => Ok(SourceStatus::Unavailable(reason)),
            Err(e) => Err(e),
        }
    }

    async fn fetch(&self) -> Result<Vec<Notification>, SourceError> {
        let json = self.run_history().await?;
        Self::parse_history(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY: &str = r#"{
        "type": "aa{sv}",
        "data": [[
            {
                "body": {"type": "s", "data": "Build finished"},
                "message": {"type": "s", "data": "<b>CI</b>\nBuild finished"},
                "summary": {"type": "s", "data": "CI"},
                "appname": {"type": "s", "data": "Jenkins"},
                "category": {"type": "s", "data": ""},
                "id": {"type": "i", "data": 12},
                "timestamp": {"type": "x", "data": 81522016},
                "urgency": {"type": "s", "data": "NORMAL"}
            },
            {
                "summary": {"type": "s", "data": "Low battery"},
                "appname": {"type": "s", "data": ""},
                "id": {"type": "i", "data": 11}
            }
        ]]
    }"#;

    #[test]
    fn parse_history_extracts_fields() {
        let notifications = DunstHistorySource::parse_history(HISTORY).unwrap();
        assert_eq!(notifications.len(), 2);

        let first = &notifications[0];
        assert_eq!(first.id.as_str(), "12:81522016");
        assert_eq!(first.app_name, "Jenkins");
        assert_eq!(first.title, "CI");
        assert_eq!(first.body, "Build finished");
    }

    #[test]
    fn parse_history_fills_missing_fields() {
        let notifications = DunstHistorySource::parse_history(HISTORY).unwrap();
        let second = &notifications[1];
        assert_eq!(second.id.as_str(), "11");
        assert_eq!(second.app_name, "Unknown App");
        assert_eq!(second.body, "");
    }

    #[test]
    fn parse_history_empty() {
        let notifications =
            DunstHistorySource::parse_history(r#"{"type":"aa{sv}","data":[[]]}"#).unwrap();
        assert!(notifications.is_empty());
    }

    #[test]
    fn parse_history_rejects_garbage() {
        assert!(matches!(
            DunstHistorySource::parse_history("not json"),
            Err(SourceError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn missing_binary_is_reported() {
        let source = DunstHistorySource::with_command("definitely-not-dunstctl-4242");

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::CommandNotFound(_)));

        let status = source.probe().await.unwrap();
        assert!(!status.is_available());
    }
}
