//! Watch loop: fetch, validate, format, notify, sleep

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api_client::ApiClient;
use crate::error::TickError;
use crate::formatter::format_status;
use crate::notifier::{deliver, Notifier};
use crate::state::NotificationState;
use crate::validator::extract;

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new status message was sent
    Notified(String),
    /// The status message equals the last one sent
    Unchanged,
    /// A stage failed; `reported` is false when the same diagnostic was already sent
    Failed { error: TickError, reported: bool },
}

/// Polls the review API and forwards status changes to a notifier
#[derive(Debug)]
pub struct WatchLoop {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    watermark: i64,
    state: NotificationState,
    retry_interval: Duration,
}

impl WatchLoop {
    pub fn new(
        api: ApiClient,
        notifier: Arc<dyn Notifier>,
        watermark: i64,
        retry_interval: Duration,
    ) -> Self {
        Self {
            api,
            notifier,
            watermark,
            state: NotificationState::new(),
            retry_interval,
        }
    }

    /// The `from_date` sent with every request; it is never advanced
    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    async fn evaluate(&self) -> Result<String, TickError> {
        tracing::info!(
            "Fetching review statuses from {} since {}",
            self.api.endpoint(),
            self.watermark
        );
        let payload = self.api.fetch(self.watermark).await?;

        tracing::info!("Validating API response");
        let record = extract(&payload)?;

        tracing::info!("Formatting latest homework status");
        Ok(format_status(&record)?)
    }

    /// Run one fetch-validate-format-notify pass without sleeping
    pub async fn tick(&mut self) -> TickOutcome {
        match self.evaluate().await {
            Ok(message) => {
                if !self.state.update_message(&message) {
                    tracing::debug!("Status unchanged, nothing to send");
                    return TickOutcome::Unchanged;
                }
                tracing::info!("Sending status notification");
                deliver(self.notifier.as_ref(), &message).await;
                TickOutcome::Notified(message)
            }
            Err(error) => {
                tracing::error!("{}", error);
                let diagnostic = error.diagnostic();
                let reported = self.state.update_error(&diagnostic);
                if reported {
                    tracing::info!("Sending error notification");
                    deliver(self.notifier.as_ref(), &diagnostic).await;
                } else {
                    tracing::debug!("Error already reported, not sending again");
                }
                TickOutcome::Failed { error, reported }
            }
        }
    }

    /// Tick, then sleep for the retry interval, until `cancel` fires
    ///
    /// Cancellation is only honoured while sleeping, so a tick always runs
    /// to completion.
    pub async fn run(&mut self, cancel: CancellationToken) {
        loop {
            let outcome = self.tick().await;
            tracing::debug!("Tick finished: {:?}", outcome);

            tokio::select! {
                _ = tokio::time::sleep(self.retry_interval) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Watch loop cancelled");
                    break;
                }
            }
        }
    }
}
