//! Alert delivery — trait + webhook implementation.

use std::time::Duration;

use serde::Serialize;

use crate::error::{MonitorError, Result};

/// Destination for rendered alert messages.
///
/// Delivery failures are never fatal: the monitor logs them and moves on
/// without retrying within the cycle.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn deliver(&self, message: &str) -> Result<()>;
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts messages to a Discord-compatible webhook as `{"content": ...}`.
pub struct WebhookNotifier {
    endpoint: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| MonitorError::Notification(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

impl Notifier for WebhookNotifier {
    async fn deliver(&self, message: &str) -> Result<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&WebhookPayload { content: message })
            .send()
            .await
            .map_err(|e| MonitorError::Notification(e.to_string()))?;

        // Discord answers 204 No Content on success.
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(MonitorError::Notification(format!("{status}: {body}")))
        }
    }
}
