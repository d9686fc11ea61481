//! Best-effort notifications to the operations desk.

use std::sync::Arc;

use async_trait::async_trait;

use crate::twilio::{TwilioClient, TwilioError};

/// Error type for notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The telephony provider rejected or failed the message.
    #[error(transparent)]
    Twilio(#[from] TwilioError),
}

/// Sends short text alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `body` to `to`.
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError>;
}

/// Notifier that sends SMS through Twilio.
pub struct TwilioNotifier {
    client: Arc<TwilioClient>,
}

impl TwilioNotifier {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: Arc<TwilioClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        let message = self.client.send_sms(to, body).await?;
        tracing::info!(to = %to, sid = %message.sid, "alert SMS sent");
        Ok(())
    }
}

/// Notifier used when no provider credentials are configured: alerts are
/// only written to the log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        tracing::warn!(to = %to, body = %body, "SMS provider not configured, alert logged only");
        Ok(())
    }
}

/// Send an alert on a detached task. Failures are logged and dropped.
pub fn dispatch(notifier: Arc<dyn Notifier>, to: String, body: String) {
    tokio::spawn(async move {
        if let Err(e) = notifier.send_sms(&to, &body).await {
            tracing::warn!(error = %e, to = %to, "could not deliver alert SMS");
        }
    });
}
