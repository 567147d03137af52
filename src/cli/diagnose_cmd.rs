//! `diagnose` command handler

use crate::application::ports::{ConfigStore, NotificationSource, SourceStatus};
use crate::domain::config::AppConfig;
use crate::domain::provider::ProviderKind;
use crate::infrastructure::{build_providers, create_source};

use super::app::ForwarderError;
use super::presenter::Presenter;

/// What `diagnose` found
#[derive(Debug)]
pub struct Diagnosis {
    pub source_name: String,
    pub source_status: SourceStatus,
    /// Records currently in the store, when it could be read
    pub store_count: Option<usize>,
    pub enabled: Vec<String>,
    pub skipped: Vec<(ProviderKind, String)>,
}

impl Diagnosis {
    pub fn is_healthy(&self) -> bool {
        self.source_status.is_available() && !self.enabled.is_empty()
    }
}

/// Probe the source and build the providers without sending anything
pub async fn diagnose<S: NotificationSource>(source: &S, config: &AppConfig) -> Diagnosis {
    let source_status = match source.probe().await {
        Ok(status) => status,
        Err(e) => SourceStatus::Unavailable(e.to_string()),
    };

    let store_count = if source_status.is_available() {
        source.fetch().await.ok().map(|n| n.len())
    } else {
        None
    };

    let providers = build_providers(config);

    Diagnosis {
        source_name: source.name().to_string(),
        source_status,
        store_count,
        enabled: providers
            .providers
            .iter()
            .map(|p| p.name().to_string())
            .collect(),
        skipped: providers.skipped,
    }
}

pub async fn handle_diagnose<S: ConfigStore>(
    store: &S,
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<(), ForwarderError> {
    presenter.heading("Configuration");
    presenter.key_value("file", &store.path().to_string_lossy());
    presenter.key_value("exists", &store.exists().to_string());
    presenter.key_value("poll_interval", &config.poll_interval_or_default().to_string());

    let filter = config.app_filter();
    if !filter.whitelist_apps().is_empty() {
        presenter.key_value("whitelist_apps", &filter.whitelist_apps().join(", "));
    }
    if !filter.ignored_apps().is_empty() {
        presenter.key_value("ignored_apps", &filter.ignored_apps().join(", "));
    }

    let source = create_source(config);
    let report = diagnose(&source, config).await;

    presenter.heading("Notification source");
    presenter.key_value("kind", &report.source_name);
    presenter.key_value("status", &report.source_status.to_string());
    if let Some(count) = report.store_count {
        presenter.key_value("notifications in store", &count.to_string());
    }

    presenter.heading("Providers");
    for name in &report.enabled {
        presenter.success(&format!("{} enabled", name));
    }
    for (kind, reason) in &report.skipped {
        presenter.warn(&format!("{} skipped: {}", kind.label(), reason));
    }

    if report.enabled.is_empty() {
        return Err(ForwarderError::NoProviders);
    }
    if !report.source_status.is_available() {
        return Err(ForwarderError::SourceUnavailable(
            report.source_status.to_string(),
        ));
    }

    Ok(())
}
