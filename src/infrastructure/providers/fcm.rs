//! Firebase Cloud Messaging provider adapter (HTTP v1 API)

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{DeliveryError, PushProvider};
use crate::domain::notification::OutboundMessage;
use crate::domain::provider::ProviderKind;

use super::http::{build_client, ensure_success, request_error};
use super::oauth::{ServiceAccount, ServiceAccountTokenSource, TokenError, FCM_SCOPE};

const FCM_API_BASE: &str = "https://fcm.googleapis.com";

/// Value of the `category` data field on every message
const CATEGORY: &str = "Desktop";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    topic: &'a str,
    notification: FcmNotification<'a>,
    data: FcmData<'a>,
    android: AndroidConfig,
}

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct FcmData<'a> {
    category: &'a str,
    source: &'a str,
}

#[derive(Debug, Serialize)]
struct AndroidConfig {
    priority: &'static str,
    notification: AndroidNotification,
}

#[derive(Debug, Serialize)]
struct AndroidNotification {
    sound: &'static str,
}

impl From<TokenError> for DeliveryError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::RequestFailed(msg) => DeliveryError::RequestFailed(msg),
            other => DeliveryError::Auth(other.to_string()),
        }
    }
}

/// Publishes high-priority messages to an FCM topic
pub struct FcmProvider {
    tokens: ServiceAccountTokenSource,
    topic: String,
    api_base: String,
    client: reqwest::Client,
}

impl FcmProvider {
    /// Create a provider from a service-account key file
    pub fn from_service_account_file(path: &Path, topic: &str) -> Result<Self, DeliveryError> {
        let account = ServiceAccount::from_file(path)
            .map_err(|e| DeliveryError::InvalidConfig(e.to_string()))?;
        Self::new(account, topic)
    }

    pub fn new(account: ServiceAccount, topic: &str) -> Result<Self, DeliveryError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DeliveryError::InvalidConfig("Topic not configured".to_string()));
        }

        let tokens = ServiceAccountTokenSource::new(account, FCM_SCOPE)
            .map_err(|e| DeliveryError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            tokens,
            topic: topic.to_string(),
            api_base: FCM_API_BASE.to_string(),
            client: build_client(),
        })
    }

    /// Send to a different API host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.api_base,
            self.tokens.account().project_id
        )
    }

    fn build_request<'a>(&'a self, message: &'a OutboundMessage) -> SendRequest<'a> {
        SendRequest {
            message: FcmMessage {
                topic: &self.topic,
                notification: FcmNotification {
                    title: &message.title,
                    body: message.body_or_placeholder(),
                },
                data: FcmData {
                    category: CATEGORY,
                    source: message.source_app.as_deref().unwrap_or_default(),
                },
                android: AndroidConfig {
                    priority: "high",
                    notification: AndroidNotification { sound: "default" },
                },
            },
        }
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Fcm
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .post(self.send_url())
            .bearer_auth(token)
            .json(&self.build_request(message))
            .send()
            .await
            .map_err(request_error)?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), DeliveryError> {
        self.tokens.access_token().await?;
        Ok(())
    }
}
