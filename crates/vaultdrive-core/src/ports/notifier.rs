//! Notification port (driven/secondary port)
//!
//! Interface for sending the run's start and summary messages through an
//! external messaging service. Delivery is best-effort from the sync
//! logic's perspective: a failed notification must not abort the run.

use tracing::warn;

/// Port trait for outbound text notifications
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    /// Sends a text message
    ///
    /// # Arguments
    /// * `text` - The message body
    async fn notify(&self, text: &str) -> anyhow::Result<()>;
}

/// Sends a notification, logging a warning instead of propagating failure.
///
/// The sync run must not abort because a message could not be delivered.
pub async fn notify_best_effort(notifier: &dyn INotifier, text: &str) {
    if let Err(e) = notifier.notify(text).await {
        warn!(error = %format!("{e:#}"), "Failed to deliver notification");
    }
}

/// A notifier that discards all messages.
///
/// Used when notifications are disabled (`--no-notify`) or the Twilio
/// environment is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait::async_trait]
impl INotifier for NullNotifier {
    async fn notify(&self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
