//! Currency code to handler registry, built once at startup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::AppConfig;
use crate::domain::CurrencyCode;
use crate::handlers::{BnaHandler, DofHandler, HandlerContext, SourceHandler, TrmHandler};
use crate::http_client::{HttpClient, NoopHttpClient, ReqwestHttpClient};
use crate::notification::{notifier_from_config, Notifier};
use crate::retry::RetryingHttpClient;
use crate::source::SourceId;

/// Registered handler summary used by the `sources` CLI command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSnapshot {
    pub code: CurrencyCode,
    pub source: SourceId,
    pub display_name: String,
    pub url: String,
}

/// Read-only map from currency code to the handler serving it.
pub struct HandlerRegistry {
    handlers: HashMap<CurrencyCode, Arc<dyn SourceHandler>>,
}

impl HandlerRegistry {
    pub fn new(handlers: Vec<Arc<dyn SourceHandler>>) -> Self {
        let handlers = handlers
            .into_iter()
            .map(|handler| (handler.code(), handler))
            .collect();
        Self { handlers }
    }

    /// The three production handlers wired to the given transport and notifier.
    pub fn from_config(
        config: &AppConfig,
        http_client: Arc<dyn HttpClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let context = |source| {
            HandlerContext::new(source, http_client.clone(), notifier.clone())
                .with_timeout(Duration::from_millis(config.http.timeout_ms))
        };

        Self::new(vec![
            Arc::new(BnaHandler::new(context(config.sources.bna.clone()))),
            Arc::new(DofHandler::new(context(config.sources.dof.clone()))),
            Arc::new(TrmHandler::new(context(config.sources.trm.clone()))),
        ])
    }

    pub fn get(&self, code: CurrencyCode) -> Option<Arc<dyn SourceHandler>> {
        self.handlers.get(&code).cloned()
    }

    /// Registered codes in declaration order (ARS, MXN, COP).
    pub fn codes(&self) -> Vec<CurrencyCode> {
        let mut codes: Vec<CurrencyCode> = self.handlers.keys().copied().collect();
        codes.sort();
        codes
    }

    pub fn snapshots(&self) -> Vec<SourceSnapshot> {
        self.codes()
            .into_iter()
            .filter_map(|code| {
                let handler = self.handlers.get(&code)?;
                Some(SourceSnapshot {
                    code,
                    source: handler.id(),
                    display_name: handler.config().display_name.clone(),
                    url: handler.config().url.clone(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Builds a [`HandlerRegistry`] with either the real transport or an offline one.
///
/// ```rust,ignore
/// use cambio_core::{AppConfig, HandlerRegistryBuilder};
///
/// let registry = HandlerRegistryBuilder::new(AppConfig::default())
///     .with_real_clients()
///     .build();
/// ```
pub struct HandlerRegistryBuilder {
    config: AppConfig,
    http_client: Option<Arc<dyn HttpClient>>,
    notifier: Option<Arc<dyn Notifier>>,
    use_real_clients: bool,
}

impl HandlerRegistryBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http_client: None,
            notifier: None,
            use_real_clients: false,
        }
    }

    /// Use reqwest wrapped in the configured retry policy.
    pub fn with_real_clients(mut self) -> Self {
        self.use_real_clients = true;
        self
    }

    /// Use a caller-supplied transport (already wrapped in any retry policy it needs).
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> HandlerRegistry {
        let http_client = match self.http_client {
            Some(client) => client,
            None if self.use_real_clients => Arc::new(RetryingHttpClient::new(
                ReqwestHttpClient::new(),
                self.config.http.retry_config(),
            )),
            None => Arc::new(NoopHttpClient),
        };

        let notifier = self.notifier.unwrap_or_else(|| {
            notifier_from_config(self.config.notification.as_ref(), http_client.clone())
        });

        HandlerRegistry::from_config(&self.config, http_client, notifier)
    }
}
