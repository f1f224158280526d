//! Monitoring API transport.

use std::time::Duration;

use reqwest::Client;

use crate::error::TransportError;
use crate::health::MonitorPayload;

/// PUTs monitor batches to the remote API.
#[derive(Debug, Clone)]
pub struct MonitorApi {
    http: Client,
    endpoint: String,
    timeout: Duration,
}

impl MonitorApi {
    pub fn new(http: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One PUT of the whole batch, authenticated with the key as basic-auth user.
    pub async fn put_monitors(
        &self,
        api_key: &str,
        payload: &[MonitorPayload],
    ) -> Result<(), TransportError> {
        let response = self
            .http
            .put(&self.endpoint)
            .basic_auth(api_key, Some(""))
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = %status, monitors = payload.len(), "Monitors published");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
