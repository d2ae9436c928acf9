//! Homework watcher - review status notification service
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and forwards them to a Telegram chat.

pub mod api_client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod io;
pub mod notifier;
pub mod state;
pub mod status;
pub mod telegram;
pub mod validator;
pub mod watch_loop;

pub use config::{load_config, Config, Credentials};
pub use error::{FetchError, Result, TickError, WatcherError};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api_client::ApiClient;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::telegram::TelegramNotifier;
use crate::watch_loop::WatchLoop;

/// Assembles a [`Watcher`] from configuration, with optional injected collaborators
pub struct WatcherBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    notifier: Option<Arc<dyn Notifier>>,
    cancel: Option<CancellationToken>,
}

impl WatcherBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            notifier: None,
            cancel: None,
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Check credentials and wire the watch loop; no request is made here
    pub fn build(self) -> Result<Watcher> {
        let credentials = self.config.credentials()?;
        self.config.validate()?;

        let http: Arc<dyn HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::with_timeout(
                self.config.api.request_timeout,
            )?),
        };

        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(TelegramNotifier::new(
                &self.config.telegram.api_url,
                &credentials.telegram_token,
                &credentials.telegram_chat_id,
                Arc::clone(&http),
            )),
        };

        let api = ApiClient::new(
            &self.config.api.endpoint,
            &credentials.practicum_token,
            Arc::clone(&http),
        );

        let watermark = self
            .config
            .api
            .from_date
            .unwrap_or_else(|| chrono::Utc::now().timestamp());
        tracing::debug!("Initial watermark: {}", watermark);

        Ok(Watcher {
            watch_loop: WatchLoop::new(api, notifier, watermark, self.config.retry_interval),
            cancel: self.cancel.unwrap_or_else(CancellationToken::new),
        })
    }
}

/// A ready-to-run watcher
#[derive(Debug)]
pub struct Watcher {
    watch_loop: WatchLoop,
    cancel: CancellationToken,
}

impl Watcher {
    pub fn watch_loop(&self) -> &WatchLoop {
        &self.watch_loop
    }

    /// Run until Ctrl-C or the cancellation token fires
    pub async fn start(mut self) -> Result<()> {
        let cancel_for_signal = self.cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    cancel_for_signal.cancel();
                }
                Err(e) => tracing::warn!("Failed to listen for ctrl-c: {}", e),
            }
        });

        tracing::info!("Homework watcher started");
        self.watch_loop.run(self.cancel.clone()).await;
        tracing::info!("Homework watcher stopped");

        Ok(())
    }
}
