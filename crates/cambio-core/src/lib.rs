//! # Cambio Core
//!
//! Daily USD quotations for ARS, MXN and COP, read from the public source that publishes each
//! one and returned in a single normalized shape.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Source records, transport policy, notification hook |
//! | [`domain`] | `Quotation`, `CurrencyCode`, date renderings |
//! | [`error`] | Validation and configuration errors |
//! | [`handlers`] | One fetch-and-parse strategy per source (BNA, DOF, TRM) |
//! | [`http_client`] | HTTP client abstraction |
//! | [`notification`] | Alerts raised when a source changes shape |
//! | [`registry`] | Currency code to handler map |
//! | [`result`] | `OperationResult` envelope and error keys |
//! | [`retry`] | Retry policy and retrying transport |
//! | [`service`] | `CurrencyService` dispatcher |
//! | [`source`] | Source identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cambio_core::{AppConfig, CurrencyCode, CurrencyService, HandlerRegistryBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load(None)?;
//!     let registry = HandlerRegistryBuilder::new(config).with_real_clients().build();
//!     let service = CurrencyService::new(registry);
//!
//!     let date = cambio_core::domain::dates::parse_iso_date("2020-02-05")?;
//!     let result = service.get_quotation(date, CurrencyCode::Ars).await;
//!     if let Some(quotation) = result.entity() {
//!         println!("{:?}", quotation.sale_value());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ CurrencyService │────▶│ HandlerRegistry  │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ SourceHandler   │────▶│ HTTP Client      │
//! │ (BNA, DOF, TRM) │     │ (retry/reqwest)  │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Notifier        │
//! │ (Slack/log)     │
//! └─────────────────┘
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod http_client;
pub mod notification;
pub mod registry;
pub mod result;
pub mod retry;
pub mod service;
pub mod source;

pub use config::{AppConfig, HttpPolicyConfig, NotificationConfig, SourceConfig, SourcesConfig};

pub use domain::{CurrencyCode, Quotation};

pub use error::{ConfigError, ValidationError};

pub use handlers::{
    BnaHandler, DofHandler, Extraction, HandlerContext, SourceError, SourceErrorKind,
    SourceHandler, TrmHandler,
};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

pub use notification::{notifier_from_config, LogNotifier, Notifier, NotifyError, SlackNotifier};

pub use registry::{HandlerRegistry, HandlerRegistryBuilder, SourceSnapshot};

pub use result::{keys, OperationResult};

pub use retry::{Backoff, RetryConfig, RetryingHttpClient};

pub use service::CurrencyService;

pub use source::SourceId;
