//! Push delivery provider port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::OutboundMessage;
use crate::domain::provider::ProviderKind;

/// Delivery errors
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}

/// Port for a remote push backend
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Which backend this is
    fn kind(&self) -> ProviderKind;

    /// Display name, defaults to the backend label
    fn name(&self) -> &str {
        self.kind().label()
    }

    /// Deliver one message. A single attempt, no retries.
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError>;

    /// Verify credentials and reachability.
    async fn test_connection(&self) -> Result<(), DeliveryError>;
}

/// Blanket implementation for boxed provider types
#[async_trait]
impl PushProvider for Box<dyn PushProvider> {
    fn kind(&self) -> ProviderKind {
        self.as_ref().kind()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        self.as_ref().send(message).await
    }

    async fn test_connection(&self) -> Result<(), DeliveryError> {
        self.as_ref().test_connection().await
    }
}
