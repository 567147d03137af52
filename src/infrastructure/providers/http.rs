//! Shared HTTP plumbing for push providers

use std::time::Duration;

use crate::application::ports::DeliveryError;

/// Per-request timeout for every provider call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("notify-forwarder/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

pub fn request_error(e: reqwest::Error) -> DeliveryError {
    DeliveryError::RequestFailed(e.to_string())
}

/// Turn a non-2xx response into [`DeliveryError::Http`]
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DeliveryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(DeliveryError::Auth(format!("HTTP {}: {}", status.as_u16(), body)));
    }

    Err(DeliveryError::Http {
        status: status.as_u16(),
        body,
    })
}
