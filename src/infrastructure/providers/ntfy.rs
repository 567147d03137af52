//! ntfy provider adapter
//!
//! Publishes JSON to the server root so titles and bodies may contain any
//! UTF-8 text.

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{DeliveryError, PushProvider};
use crate::domain::notification::OutboundMessage;
use crate::domain::provider::ProviderKind;

use super::http::{build_client, ensure_success, request_error};

const PRIORITY_LOW: u8 = 2;
const PRIORITY_DEFAULT: u8 = 3;

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    topic: &'a str,
    title: &'a str,
    message: &'a str,
    priority: u8,
    tags: Vec<String>,
}

/// Publishes notifications to an ntfy topic
pub struct NtfyProvider {
    server_url: String,
    topic: String,
    credentials: Option<(String, String)>,
    client: reqwest::Client,
}

impl NtfyProvider {
    /// Create a provider; fails when the server URL or topic is empty
    pub fn new(server_url: &str, topic: &str) -> Result<Self, DeliveryError> {
        let server_url = server_url.trim().trim_end_matches('/').to_string();
        let topic = topic.trim().to_string();

        if server_url.is_empty() || topic.is_empty() {
            return Err(DeliveryError::InvalidConfig(
                "Server URL or topic not configured".to_string(),
            ));
        }

        Ok(Self {
            server_url,
            topic,
            credentials: None,
            client: build_client(),
        })
    }

    /// Enable HTTP basic auth
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Tag derived from the source app: lower-cased, spaces as underscores
    fn app_tag(app: &str) -> String {
        app.to_lowercase().replace(' ', "_")
    }

    fn build_request<'a>(&'a self, message: &'a OutboundMessage) -> PublishRequest<'a> {
        let mut tags = vec!["computer".to_string()];
        if let Some(app) = message.source_app.as_deref().filter(|a| !a.is_empty()) {
            tags.push(Self::app_tag(app));
        }

        PublishRequest {
            topic: &self.topic,
            title: &message.title,
            message: message.body_or_placeholder(),
            priority: PRIORITY_DEFAULT,
            tags,
        }
    }

    async fn publish(&self, request: &PublishRequest<'_>) -> Result<(), DeliveryError> {
        let mut builder = self.client.post(&self.server_url).json(request);
        if let Some((username, password)) = &self.credentials {
            builder = builder.basic_auth(username, Some(password));
        }

        let response = builder.send().await.map_err(request_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PushProvider for NtfyProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ntfy
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        self.publish(&self.build_request(message)).await
    }

    async fn test_connection(&self) -> Result<(), DeliveryError> {
        let request = PublishRequest {
            topic: &self.topic,
            title: "Connection Test",
            message: "Connection test",
            priority: PRIORITY_LOW,
            tags: vec!["white_check_mark".to_string()],
        };
        self.publish(&request).await
    }
}
