//! Retry policy for the outbound transport.
//!
//! Handlers only ever see the final outcome of a [`RetryingHttpClient`]: transient statuses and
//! retryable transport failures are repeated here, one attempt after another, before any body
//! is parsed.

use std::time::Duration;

use tracing::warn;

use crate::http_client::{HttpClient, HttpError, HttpFuture, HttpRequest};

/// Wait between two attempts: `initial * multiplier^retry`, never above `ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    initial: Duration,
    multiplier: u32,
    ceiling: Duration,
    jitter: bool,
}

impl Default for Backoff {
    /// 2s, 4s, 8s, ... capped at one minute.
    fn default() -> Self {
        Self::exponential(Duration::from_secs(2), 2, Duration::from_secs(60))
    }
}

impl Backoff {
    pub const fn exponential(initial: Duration, multiplier: u32, ceiling: Duration) -> Self {
        Self {
            initial,
            multiplier,
            ceiling,
            jitter: false,
        }
    }

    pub const fn constant(delay: Duration) -> Self {
        Self::exponential(delay, 1, delay)
    }

    /// Spread each wait uniformly over +/- 50% of its nominal value.
    pub const fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    /// Wait before retry number `retry` (0 is the first retry).
    pub fn delay(&self, retry: u32) -> Duration {
        let nominal = self
            .initial
            .saturating_mul(self.multiplier.saturating_pow(retry))
            .min(self.ceiling);

        if !self.jitter {
            return nominal;
        }

        let nominal_ms = u64::try_from(nominal.as_millis()).unwrap_or(u64::MAX);
        let spread = nominal_ms / 2;
        let offset = fastrand::u64(0..=spread.saturating_mul(2));
        Duration::from_millis((nominal_ms - spread).saturating_add(offset))
    }
}

/// What is retried and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts made after the first one.
    pub max_retries: u32,
    pub backoff: Backoff,
    pub retry_on_status: Vec<u16>,
    pub retry_on_timeout: bool,
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RetryConfig {
    /// Default exponential backoff with `max_retries` retries on 408 and 5xx gateway statuses.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::default(),
            retry_on_status: vec![408, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }

    pub fn constant(delay: Duration, max_retries: u32) -> Self {
        Self {
            backoff: Backoff::constant(delay),
            ..Self::new(max_retries)
        }
    }

    /// Single attempt, whatever the outcome.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn is_transient_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    pub fn is_transient_error(&self, error: &HttpError) -> bool {
        match error {
            HttpError::Timeout(_) => self.retry_on_timeout,
            HttpError::Connect(_) => self.retry_on_connect,
            other => other.is_retryable(),
        }
    }
}

/// Transport decorator applying a [`RetryConfig`] to every request.
#[derive(Debug, Clone)]
pub struct RetryingHttpClient<C> {
    inner: C,
    config: RetryConfig,
}

impl<C: HttpClient> RetryingHttpClient<C> {
    pub fn new(inner: C, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl<C: HttpClient> HttpClient for RetryingHttpClient<C> {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        Box::pin(async move {
            let mut retry = 0;

            loop {
                let outcome = self.inner.execute(request.clone()).await;
                let cause = match &outcome {
                    Ok(response) if self.config.is_transient_status(response.status) => {
                        Some(format!("status {}", response.status))
                    }
                    Err(error) if self.config.is_transient_error(error) => Some(error.to_string()),
                    _ => None,
                };
                let Some(cause) = cause else {
                    return outcome;
                };

                if retry >= self.config.max_retries {
                    warn!(url = %request.url, %cause, attempts = retry + 1, "giving up");
                    return outcome;
                }

                let delay = self.config.backoff.delay(retry);
                warn!(
                    url = %request.url,
                    %cause,
                    retry = retry + 1,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                retry += 1;
            }
        })
    }
}
