//! Notification source adapters

mod dunst;
mod snapshot;

pub use dunst::DunstHistorySource;
pub use snapshot::SnapshotFileSource;

use std::path::PathBuf;

use crate::application::ports::NotificationSource;
use crate::domain::config::AppConfig;
use crate::domain::provider::SourceKind;

/// Default snapshot location when none is configured
pub fn default_snapshot_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notify-forwarder")
        .join("notifications.json")
}

/// Create the configured notification source
pub fn create_source(config: &AppConfig) -> Box<dyn NotificationSource> {
    match config.source_kind_or_default() {
        SourceKind::Dunst => Box::new(DunstHistorySource::with_command(
            config.dunst_command_or_default(),
        )),
        SourceKind::Snapshot => {
            let path = config
                .snapshot_path()
                .map(PathBuf::from)
                .unwrap_or_else(default_snapshot_path);
            Box::new(SnapshotFileSource::new(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::SourceConfig;

    #[test]
    fn creates_dunst_by_default() {
        let source = create_source(&AppConfig::empty());
        assert_eq!(source.name(), "dunst");
    }

    #[test]
    fn creates_snapshot_source() {
        let config = AppConfig {
            source: Some(SourceConfig {
                kind: Some("snapshot".to_string()),
                snapshot_path: Some("/tmp/store.json".to_string()),
                dunst_command: None,
            }),
            ..Default::default()
        };
        assert_eq!(create_source(&config).name(), "snapshot");
    }

    #[test]
    fn default_snapshot_path_is_namespaced() {
        let path = default_snapshot_path();
        assert!(path.to_string_lossy().contains("notify-forwarder"));
    }
}
