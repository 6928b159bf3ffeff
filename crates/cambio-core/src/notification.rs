//! Out-of-band alerts raised when a source no longer has the expected shape.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::NotificationConfig;
use crate::http_client::{HttpClient, HttpRequest};

/// Notification delivery failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError {
    message: String,
}

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for NotifyError {}

pub type NotifyFuture<'a> = Pin<Box<dyn Future<Output = Result<(), NotifyError>> + Send + 'a>>;

/// Notification sink injected into every handler.
pub trait Notifier: Send + Sync {
    fn notify<'a>(&'a self, message: &'a str) -> NotifyFuture<'a>;
}

/// Used when no hook is configured: records the fact in the log and succeeds.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify<'a>(&'a self, message: &'a str) -> NotifyFuture<'a> {
        Box::pin(async move {
            info!(%message, "no notification hook configured; alert only logged");
            Ok(())
        })
    }
}

#[derive(Serialize)]
struct SlackPayload<'a> {
    text: &'a str,
}

/// Posts `{"text": ...}` to a Slack-compatible incoming webhook.
pub struct SlackNotifier {
    http_client: Arc<dyn HttpClient>,
    url: String,
    default_text: String,
    timeout: Duration,
}

impl SlackNotifier {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &NotificationConfig) -> Self {
        Self {
            http_client,
            url: config.url.clone(),
            default_text: config.text.clone(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl Notifier for SlackNotifier {
    fn notify<'a>(&'a self, message: &'a str) -> NotifyFuture<'a> {
        Box::pin(async move {
            let text = if message.trim().is_empty() {
                self.default_text.as_str()
            } else {
                message
            };

            let body = serde_json::to_string(&SlackPayload { text })
                .map_err(|e| NotifyError::new(format!("failed to encode payload: {e}")))?;
            let request = HttpRequest::post_json(&self.url, body).timeout(self.timeout);

            let response = self
                .http_client
                .execute(request)
                .await
                .map_err(|e| NotifyError::new(format!("webhook transport error: {e}")))?;

            if !response.is_success() {
                return Err(NotifyError::new(format!(
                    "webhook returned status {}",
                    response.status
                )));
            }
            Ok(())
        })
    }
}

/// Pick the notifier for the configured hook.
///
/// A missing section, or a URL that is not an absolute http(s) URL, falls back to
/// [`LogNotifier`]; it never fails startup.
pub fn notifier_from_config(
    config: Option<&NotificationConfig>,
    http_client: Arc<dyn HttpClient>,
) -> Arc<dyn Notifier> {
    let Some(config) = config else {
        return Arc::new(LogNotifier);
    };

    match url::Url::parse(config.url.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Arc::new(SlackNotifier::new(http_client, config))
        }
        Ok(url) => {
            warn!(scheme = url.scheme(), "notification url must be http(s); alerts will only be logged");
            Arc::new(LogNotifier)
        }
        Err(error) => {
            warn!(%error, "invalid notification url; alerts will only be logged");
            Arc::new(LogNotifier)
        }
    }
}
