//! Dispatcher: fans a message out to every enabled provider

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::notification::OutboundMessage;

use super::ports::{DeliveryError, PushProvider};

/// Result of one provider attempt
#[derive(Debug, Clone)]
pub struct ProviderOutcome {
    pub provider: String,
    pub result: Result<(), DeliveryError>,
}

impl ProviderOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-provider results for one dispatched message
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<ProviderOutcome>,
}

impl DispatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_failed(&self) -> bool {
        self.total() > 0 && self.succeeded() == 0
    }

    pub fn outcome(&self, provider: &str) -> Option<&ProviderOutcome> {
        self.outcomes.iter().find(|o| o.provider == provider)
    }
}

/// Sends each message to all providers, isolating their failures.
pub struct Dispatcher {
    providers: Vec<Box<dyn PushProvider>>,
}

impl Dispatcher {
    pub fn new(providers: Vec<Box<dyn PushProvider>>) -> Self {
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn summary(&self) -> String {
        if self.providers.is_empty() {
            return "No providers enabled".to_string();
        }
        let names = self.provider_names();
        format!("Enabled providers ({}): {}", names.len(), names.join(", "))
    }

    /// Deliver `message` to every provider concurrently, one attempt each.
    pub async fn dispatch(&self, message: &OutboundMessage) -> DispatchReport {
        if self.providers.is_empty() {
            warn!("No enabled providers to send notification");
            return DispatchReport::default();
        }

        let attempts = self.providers.iter().map(|provider| async move {
            let result = provider.send(message).await;
            match &result {
                Ok(()) => debug!(provider = provider.name(), title = %message.title, "Delivered"),
                Err(e) => warn!(provider = provider.name(), error = %e, "Delivery failed"),
            }
            ProviderOutcome {
                provider: provider.name().to_string(),
                result,
            }
        });

        let report = DispatchReport {
            outcomes: join_all(attempts).await,
        };
        info!(
            succeeded = report.succeeded(),
            total = report.total(),
            "Sent to {}/{} providers",
            report.succeeded(),
            report.total()
        );
        report
    }

    /// Run every provider's connection test.
    pub async fn test_all(&self) -> Vec<ProviderOutcome> {
        let checks = self.providers.iter().map(|provider| async move {
            ProviderOutcome {
                provider: provider.name().to_string(),
                result: provider.test_connection().await,
            }
        });
        join_all(checks).await
    }
}
