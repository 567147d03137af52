//! Pushbullet provider adapter

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{DeliveryError, PushProvider};
use crate::domain::notification::OutboundMessage;
use crate::domain::provider::ProviderKind;

use super::http::{build_client, ensure_success, request_error};

/// Pushbullet API base URL
const API_BASE_URL: &str = "https://api.pushbullet.com";

/// Shortest token accepted as plausibly valid
pub const MIN_TOKEN_LEN: usize = 10;

#[derive(Debug, Serialize)]
struct NotePush<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'a str,
    body: &'a str,
}

/// Sends `note` pushes to every device on a Pushbullet account
pub struct PushbulletProvider {
    api_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl PushbulletProvider {
    /// Create a provider; fails when the token is too short to be real
    pub fn new(api_token: impl Into<String>) -> Result<Self, DeliveryError> {
        Self::with_base_url(api_token, API_BASE_URL)
    }

    /// Create against a custom API host
    pub fn with_base_url(
        api_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DeliveryError> {
        let api_token = api_token.into();
        if api_token.trim().len() < MIN_TOKEN_LEN {
            return Err(DeliveryError::InvalidConfig(
                "API token not configured".to_string(),
            ));
        }

        Ok(Self {
            api_token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/v2/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl PushProvider for PushbulletProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Pushbullet
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        let push = NotePush {
            kind: "note",
            title: &message.title,
            body: message.body_or_placeholder(),
        };

        let response = self
            .client
            .post(self.url("pushes"))
            .header("Access-Token", &self.api_token)
            .json(&push)
            .send()
            .await
            .map_err(request_error)?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), DeliveryError> {
        let response = self
            .client
            .get(self.url("users/me"))
            .header("Access-Token", &self.api_token)
            .send()
            .await
            .map_err(request_error)?;

        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "o.test-token-123456";

    #[test]
    fn rejects_short_token() {
        assert!(PushbulletProvider::new("short").is_err());
        assert!(PushbulletProvider::new("").is_err());
        assert!(PushbulletProvider::new(TOKEN).is_ok());
    }

    #[tokio::test]
    async fn send_posts_note_push() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/pushes"))
            .and(header("Access-Token", TOKEN))
            .and(body_json(json!({
                "type": "note",
                "title": "Reminder",
                "body": "(No content)"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": true})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = PushbulletProvider::with_base_url(TOKEN, server.uri()).unwrap();
        provider
            .send(&OutboundMessage::new("Reminder", "").with_source_app("Calendar"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/users/me"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let provider = PushbulletProvider::with_base_url(TOKEN, server.uri()).unwrap();
        let err = provider.test_connection().await.unwrap_err();

        assert!(matches!(err, DeliveryError::Auth(_)));
    }

    #[tokio::test]
    async fn test_connection_fetches_current_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/users/me"))
            .and(header("Access-Token", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Alice"})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = PushbulletProvider::with_base_url(TOKEN, server.uri()).unwrap();
        provider.test_connection().await.unwrap();
    }
}
