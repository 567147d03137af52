//! Push provider adapters and the factory that builds them from config

mod fcm;
mod http;
mod ntfy;
mod oauth;
mod pushbullet;

pub use fcm::FcmProvider;
pub use ntfy::NtfyProvider;
pub use oauth::{ServiceAccount, ServiceAccountTokenSource, TokenError, FCM_SCOPE};
pub use pushbullet::{PushbulletProvider, MIN_TOKEN_LEN};

use std::path::Path;

use tracing::{debug, warn};

use crate::application::ports::{DeliveryError, PushProvider};
use crate::domain::config::AppConfig;
use crate::domain::provider::ProviderKind;

/// Providers that were built, and enabled ones that were not
#[derive(Default)]
pub struct ProviderSet {
    pub providers: Vec<Box<dyn PushProvider>>,
    pub skipped: Vec<(ProviderKind, String)>,
}

impl ProviderSet {
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn add(&mut self, kind: ProviderKind, built: Result<Box<dyn PushProvider>, DeliveryError>) {
        match built {
            Ok(provider) => {
                debug!(provider = kind.label(), "Provider enabled");
                self.providers.push(provider);
            }
            Err(e) => {
                warn!(provider = kind.label(), error = %e, "Provider skipped");
                self.skipped.push((kind, e.to_string()));
            }
        }
    }
}

fn build_fcm(config: &AppConfig) -> Result<Box<dyn PushProvider>, DeliveryError> {
    let path = Path::new(config.fcm_service_account_file_or_default());
    if !path.exists() {
        return Err(DeliveryError::InvalidConfig(format!(
            "Service account file not found: {}",
            path.display()
        )));
    }

    let provider = FcmProvider::from_service_account_file(path, config.fcm_topic_or_default())?;
    Ok(Box::new(provider))
}

fn build_pushbullet(config: &AppConfig) -> Result<Box<dyn PushProvider>, DeliveryError> {
    let token = config.pushbullet_api_token().unwrap_or_default();
    Ok(Box::new(PushbulletProvider::new(token)?))
}

fn build_ntfy(config: &AppConfig) -> Result<Box<dyn PushProvider>, DeliveryError> {
    let mut provider = NtfyProvider::new(
        config.ntfy_server_url_or_default(),
        config.ntfy_topic_or_default(),
    )?;
    if let Some((username, password)) = config.ntfy_credentials() {
        provider = provider.with_credentials(username, password);
    }
    Ok(Box::new(provider))
}

/// Build every enabled provider, in FCM, Pushbullet, ntfy order
pub fn build_providers(config: &AppConfig) -> ProviderSet {
    let mut set = ProviderSet::default();

    if config.fcm_enabled_or_default() {
        set.add(ProviderKind::Fcm, build_fcm(config));
    }
    if config.pushbullet_enabled_or_default() {
        set.add(ProviderKind::Pushbullet, build_pushbullet(config));
    }
    if config.ntfy_enabled_or_default() {
        set.add(ProviderKind::Ntfy, build_ntfy(config));
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{FcmConfig, NtfyConfig, PushbulletConfig};
    use tempfile::TempDir;

    fn config(fcm: FcmConfig, pushbullet: PushbulletConfig, ntfy: NtfyConfig) -> AppConfig {
        AppConfig {
            fcm: Some(fcm),
            pushbullet: Some(pushbullet),
            ntfy: Some(ntfy),
            ..Default::default()
        }
    }

    fn disabled_fcm() -> FcmConfig {
        FcmConfig {
            enabled: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_enable_ntfy_and_skip_unconfigured_providers() {
        let set = build_providers(&AppConfig {
            fcm: Some(FcmConfig {
                service_account_file: Some("/nonexistent/sa.json".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        let names: Vec<&str> = set.providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Ntfy"]);
        let skipped: Vec<ProviderKind> = set.skipped.iter().map(|(k, _)| *k).collect();
        assert_eq!(skipped, vec![ProviderKind::Fcm, ProviderKind::Pushbullet]);
    }

    #[test]
    fn disabled_providers_are_neither_built_nor_skipped() {
        let set = build_providers(&config(
            disabled_fcm(),
            PushbulletConfig {
                enabled: Some(false),
                api_token: None,
            },
            NtfyConfig {
                enabled: Some(false),
                ..Default::default()
            },
        ));

        assert!(set.is_empty());
        assert!(set.skipped.is_empty());
    }

    #[test]
    fn pushbullet_with_valid_token_is_built() {
        let set = build_providers(&config(
            disabled_fcm(),
            PushbulletConfig {
                enabled: Some(true),
                api_token: Some("o.abcdefghijklmnop".to_string()),
            },
            NtfyConfig {
                enabled: Some(false),
                ..Default::default()
            },
        ));

        assert_eq!(set.providers.len(), 1);
        assert_eq!(set.providers[0].kind(), ProviderKind::Pushbullet);
    }

    #[test]
    fn ntfy_with_blank_topic_is_skipped() {
        let set = build_providers(&config(
            disabled_fcm(),
            PushbulletConfig {
                enabled: Some(false),
                api_token: None,
            },
            NtfyConfig {
                enabled: Some(true),
                topic: Some("  ".to_string()),
                ..Default::default()
            },
        ));

        assert!(set.is_empty());
        assert_eq!(set.skipped[0].0, ProviderKind::Ntfy);
    }

    #[test]
    fn fcm_with_key_file_is_built() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service-account.json");
        std::fs::write(&path, oauth::tests::account_json("http://localhost/token")).unwrap();

        let set = build_providers(&config(
            FcmConfig {
                enabled: Some(true),
                service_account_file: Some(path.to_string_lossy().into_owned()),
                topic: None,
            },
            PushbulletConfig {
                enabled: Some(false),
                api_token: None,
            },
            NtfyConfig {
                enabled: Some(false),
                ..Default::default()
            },
        ));

        assert_eq!(set.providers.len(), 1);
        assert_eq!(set.providers[0].kind(), ProviderKind::Fcm);
    }
}
