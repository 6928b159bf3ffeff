//! Source handler contract and the plumbing shared by every implementation.
//!
//! A handler owns exactly one external source. It builds the request URL for a date, fetches
//! the body through the shared transport and hands it to a pure `extract` function. The
//! extraction outcome decides the [`OperationResult`]:
//!
//! | Outcome | Result | Notification |
//! |---------|--------|--------------|
//! | [`Extraction::Found`] | success, entity populated | no |
//! | [`Extraction::NoData`] | success, `available() == false`, `no data for this date` notice | no |
//! | [`Extraction::Structural`] | `html/structure error` | exactly one |
//!
//! Transport failures and non-2xx final statuses are reported as [`Extraction::Structural`].
//! `Err(SourceError)` is reserved for faults that should never happen at runtime, such as a
//! request URL that does not parse.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use time::Date;
use tracing::{error, info, warn};

use crate::config::SourceConfig;
use crate::domain::{CurrencyCode, Quotation};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::notification::Notifier;
use crate::result::{keys, OperationResult};
use crate::source::SourceId;

pub mod bna;
pub mod dof;
mod parsing;
pub mod trm;

pub use bna::BnaHandler;
pub use dof::DofHandler;
pub use parsing::{normalize_dot_decimal, parse_comma_decimal};
pub use trm::TrmHandler;

/// Error category for unexpected handler faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    InvalidRequest,
    Internal,
}

/// Unexpected handler fault, converted to `internal error` by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<time::error::Format> for SourceError {
    fn from(error: time::error::Format) -> Self {
        Self::internal(format!("date rendering failed: {error}"))
    }
}

/// Outcome of parsing one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A quotation was located for the requested date.
    Found(Quotation),
    /// The source explicitly says nothing is published for the date.
    NoData(Quotation),
    /// The expected structure is missing; the reason is reported back to the caller.
    Structural(String),
}

pub type HandlerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<OperationResult<Quotation>, SourceError>> + Send + 'a>>;

/// Fetch-and-parse strategy for one external source.
pub trait SourceHandler: Send + Sync {
    fn id(&self) -> SourceId;

    fn code(&self) -> CurrencyCode;

    fn config(&self) -> &SourceConfig;

    fn handle<'a>(&'a self, date: Date) -> HandlerFuture<'a>;
}

/// Dependencies every handler is built from.
#[derive(Clone)]
pub struct HandlerContext {
    config: SourceConfig,
    http_client: Arc<dyn HttpClient>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
}

impl HandlerContext {
    pub fn new(
        config: SourceConfig,
        http_client: Arc<dyn HttpClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            http_client,
            notifier,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Issue the GET for `url`, run `extract` on the body and turn the outcome into a result.
    pub(crate) async fn run<F>(
        &self,
        source: SourceId,
        code: CurrencyCode,
        date: Date,
        url: String,
        extract: F,
    ) -> Result<OperationResult<Quotation>, SourceError>
    where
        F: FnOnce(&str) -> Extraction,
    {
        url::Url::parse(&url).map_err(|error| {
            SourceError::invalid_request(format!("{source} request url '{url}' is invalid: {error}"))
        })?;

        info!(%source, %url, "sending request");
        let request = HttpRequest::get(url).timeout(self.timeout);

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(transport) => {
                let outcome =
                    Extraction::Structural(format!("{source} transport error: {transport}"));
                return Ok(self.finish(source, code, date, outcome, None).await);
            }
        };

        let outcome = if response.is_success() {
            extract(&response.body)
        } else {
            Extraction::Structural(format!("{source} returned status {}", response.status))
        };

        Ok(self.finish(source, code, date, outcome, Some(&response)).await)
    }

    async fn finish(
        &self,
        source: SourceId,
        code: CurrencyCode,
        date: Date,
        outcome: Extraction,
        response: Option<&HttpResponse>,
    ) -> OperationResult<Quotation> {
        match outcome {
            Extraction::Found(quotation) => {
                info!(%source, %code, %date, "quotation found");
                OperationResult::success(quotation)
            }
            Extraction::NoData(quotation) => {
                info!(%source, %code, %date, "no quotation published for date");
                OperationResult::success(quotation)
                    .with_notice(keys::NO_DATA_FOR_DATE, self.config.no_data_marker.clone())
            }
            Extraction::Structural(reason) => {
                let content_type = response
                    .and_then(|response| response.content_type.as_deref())
                    .unwrap_or("none");
                let body = response.map_or("", |response| response.body.as_str());
                error!(%source, %code, %date, %reason, content_type, body, "unexpected response structure");

                let message = structure_alert(source, code, date);
                if let Err(failure) = self.notifier.notify(&message).await {
                    warn!(%source, error = %failure, "failed to deliver notification");
                }
                OperationResult::failure(keys::STRUCTURE_ERROR, reason)
            }
        }
    }
}

/// Text sent to the notification hook when a source breaks.
pub fn structure_alert(source: SourceId, code: CurrencyCode, date: Date) -> String {
    format!(
        "Can't get currency from {code} currency code, please check the {source} response in the log or if the date is holiday {date}"
    )
}
