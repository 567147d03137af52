//! Google service-account OAuth2 token source
//!
//! Signs a JWT assertion with the account's private key and exchanges it for
//! a short-lived access token. Tokens are cached until shortly before expiry.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use super::http::build_client;

/// Scope required to send FCM messages
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

/// Token acquisition errors
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to read service account file: {0}")]
    ReadFailed(String),

    #[error("Invalid service account file: {0}")]
    InvalidAccount(String),

    #[error("Failed to sign assertion: {0}")]
    SigningFailed(String),

    #[error("Token request failed: {0}")]
    RequestFailed(String),

    #[error("Token endpoint rejected the request: {0}")]
    Rejected(String),
}

/// The fields of a Google service-account key file we use
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

impl ServiceAccount {
    /// Load and validate a key file
    pub fn from_file(path: &Path) -> Result<Self, TokenError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TokenError::ReadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, TokenError> {
        let account: Self = serde_json::from_str(content)
            .map_err(|e| TokenError::InvalidAccount(e.to_string()))?;

        if account.project_id.trim().is_empty() {
            return Err(TokenError::InvalidAccount("missing project_id".to_string()));
        }
        if account.client_email.trim().is_empty() {
            return Err(TokenError::InvalidAccount("missing client_email".to_string()));
        }

        Ok(account)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: DateTime<Utc>,
}

/// Issues bearer tokens for one service account and scope
pub struct ServiceAccountTokenSource {
    account: ServiceAccount,
    key: EncodingKey,
    scope: String,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    pub fn new(account: ServiceAccount, scope: impl Into<String>) -> Result<Self, TokenError> {
        let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| TokenError::InvalidAccount(format!("private_key: {}", e)))?;

        Ok(Self {
            account,
            key,
            scope: scope.into(),
            client: build_client(),
            cached: Mutex::new(None),
        })
    }

    pub fn account(&self) -> &ServiceAccount {
        &self.account
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = AssertionClaims {
            iss: &self.account.client_email,
            scope: &self.scope,
            aud: &self.account.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    async fn request_token(&self) -> Result<CachedToken, TokenError> {
        let now = Utc::now();
        let assertion = self.sign_assertion(now)?;

        let response = self
            .client
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| TokenError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TokenError::Rejected(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::RequestFailed(format!("invalid token response: {}", e)))?;

        tracing::debug!(expires_in = token.expires_in, "Obtained FCM access token");

        Ok(CachedToken {
            value: token.access_token,
            refresh_at: now + Duration::seconds(token.expires_in - REFRESH_MARGIN_SECS),
        })
    }

    /// Return a valid access token, refreshing it when close to expiry
    pub async fn access_token(&self) -> Result<String, TokenError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Utc::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}
