use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method};

use super::error::DeliveryError;
use super::types::NotificationPayload;

/// Seam for notification delivery, so the sweeper can be tested without a
/// network. Implementations must not panic on failure; every failure mode
/// folds into a [`DeliveryError`].
pub trait Notifier: Send + Sync {
    /// Attempt exactly one delivery of `payload` to `url` using `method`.
    /// Success means the endpoint answered with a 2xx status.
    fn notify(
        &self,
        url: &str,
        method: &str,
        payload: &NotificationPayload,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// HTTP notifier backed by `reqwest`. One attempt per call — retry is the
/// sweep loop's concern, via re-selection on the next tick.
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    pub fn new(request_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(request_timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }
}

impl Notifier for WebhookClient {
    async fn notify(
        &self,
        url: &str,
        method: &str,
        payload: &NotificationPayload,
    ) -> Result<(), DeliveryError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| DeliveryError::InvalidMethod(method.to_string()))?;

        let response = self
            .client
            .request(method, url)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
