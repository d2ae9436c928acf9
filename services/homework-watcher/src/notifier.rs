//! Notifier trait for sending chat messages

use async_trait::async_trait;

/// Trait for sending a text message to a fixed destination
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a plain-text message
    async fn notify(&self, text: &str) -> crate::Result<()>;
}

/// Best-effort delivery: failures are logged and never propagated
pub async fn deliver(notifier: &dyn Notifier, text: &str) {
    match notifier.notify(text).await {
        Ok(()) => tracing::info!("Message sent via '{}': {}", notifier.type_name(), text),
        Err(e) => tracing::error!(
            "Unable to send message via '{}': {}",
            notifier.type_name(),
            e
        ),
    }
}
