//! BDD step definitions for Telegram notification feature

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use cucumber::{given, then, when};

use homework_watcher::io::{HttpClient, HttpResponse};
use homework_watcher::notifier::deliver;
use homework_watcher::telegram::TelegramNotifier;
use homework_watcher::WatcherError;

use crate::world::WatcherWorld;

/// Mock HTTP client for the Bot API returning a fixed status
struct FixedPostClient {
    status: u16,
    body: &'static str,
}

#[async_trait::async_trait]
impl HttpClient for FixedPostClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_watcher::Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_watcher::Result<HttpResponse> {
        Ok(HttpResponse {
            status: self.status,
            body: self.body.to_string(),
        })
    }
}

/// Mock HTTP client that simulates network failure and counts POST attempts
#[derive(Default)]
struct UnreachablePostClient {
    attempts: Arc<AtomicU32>,
}

#[async_trait::async_trait]
impl HttpClient for UnreachablePostClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_watcher::Result<HttpResponse> {
        Err(WatcherError::Http("connection refused".to_string()))
    }

    async fn post_form(
        &self,
        url: &str,
        _params: &[(&str, &str)],
    ) -> homework_watcher::Result<HttpResponse> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(WatcherError::Http(format!(
            "POST {} failed: connection refused",
            url
        )))
    }
}

fn telegram(http: Arc<dyn HttpClient>) -> TelegramNotifier {
    TelegramNotifier::new("https://telegram.test", "bot-token", "42", http)
}

#[given("a Telegram notifier with valid credentials")]
fn telegram_valid(world: &mut WatcherWorld) {
    let http = Arc::new(FixedPostClient {
        status: 200,
        body: r#"{"ok":true}"#,
    });
    world.notifier = Some(Box::new(telegram(http)));
}

#[given("a Telegram notifier that returns an API error")]
fn telegram_api_error(world: &mut WatcherWorld) {
    let http = Arc::new(FixedPostClient {
        status: 403,
        body: r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#,
    });
    world.notifier = Some(Box::new(telegram(http)));
}

#[given("a Telegram notifier that is unreachable")]
fn telegram_unreachable(world: &mut WatcherWorld) {
    let http = UnreachablePostClient::default();
    world.post_attempts = Some(Arc::clone(&http.attempts));
    world.notifier = Some(Box::new(telegram(Arc::new(http))));
}

#[when(expr = "a notification is sent with text {string}")]
async fn send_notification(world: &mut WatcherWorld, text: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    world.notification_result = Some(notifier.notify(&text).await);
}

#[when(expr = "a notification is delivered best-effort with text {string}")]
async fn deliver_notification(world: &mut WatcherWorld, text: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    deliver(&**notifier, &text).await;
}

#[then("the notification should succeed")]
fn notification_succeeds(world: &mut WatcherWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then(expr = "the notification should fail with an error mentioning {string}")]
fn notification_fails(world: &mut WatcherWorld, fragment: String) {
    let result = world.notification_result.as_ref().expect("no result");
    let err = result.as_ref().expect_err("expected notification to fail");
    assert!(
        err.to_string().contains(&fragment),
        "'{}' does not mention '{}'",
        err,
        fragment
    );
}

#[then("the bot token should not appear in the error")]
fn token_not_in_error(world: &mut WatcherWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    let err = result.as_ref().expect_err("expected notification to fail");
    assert!(!err.to_string().contains("bot-token"), "{}", err);
}

#[then(expr = "the Bot API should have been called {int} time(s)")]
fn bot_api_called(world: &mut WatcherWorld, count: u32) {
    let attempts = world.post_attempts.as_ref().expect("no counting HTTP client");
    assert_eq!(attempts.load(Ordering::SeqCst), count);
}
