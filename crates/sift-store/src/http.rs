//! Shared HTTP client construction and response handling.

use std::time::Duration;

use crate::error::{Result, StoreError};

/// HTTP client with 30s connect timeout, 60s request timeout and a
/// `sift/{version}` user-agent.
#[must_use]
pub fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(60))
        .user_agent(concat!("sift/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
}

/// Body of a successful response, or [`StoreError::Status`].
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::debug!(%status, %body, "request failed");
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
