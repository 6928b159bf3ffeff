//! Colombian TRM (tasa representativa del mercado) from the open data JSON endpoint.

use serde::Deserialize;
use time::Date;
use tracing::debug;

use super::parsing::parse_plain_decimal;
use super::{Extraction, HandlerContext, HandlerFuture, SourceError, SourceHandler};
use crate::config::SourceConfig;
use crate::domain::{dates, CurrencyCode, Quotation};
use crate::source::SourceId;

/// One record of the endpoint. The validity timestamps are informational only; the published
/// values are not always well-formed, so they are kept as raw strings.
#[derive(Debug, Deserialize)]
struct TrmRecord {
    valor: serde_json::Value,
    #[serde(default)]
    vigenciadesde: Option<String>,
    #[serde(default)]
    vigenciahasta: Option<String>,
}

pub struct TrmHandler {
    context: HandlerContext,
}

impl TrmHandler {
    pub fn new(context: HandlerContext) -> Self {
        Self { context }
    }

    /// `{url}{yyyy-MM-dd}`
    pub fn request_url(&self, date: Date) -> Result<String, SourceError> {
        let day = dates::iso(date)?;
        Ok(format!("{}{}", self.context.config().url, urlencoding::encode(&day)))
    }
}

impl SourceHandler for TrmHandler {
    fn id(&self) -> SourceId {
        SourceId::Trm
    }

    fn code(&self) -> CurrencyCode {
        CurrencyCode::Cop
    }

    fn config(&self) -> &SourceConfig {
        self.context.config()
    }

    fn handle<'a>(&'a self, date: Date) -> HandlerFuture<'a> {
        Box::pin(async move {
            let config = self.context.config();
            let url = self.request_url(date)?;
            self.context
                .run(self.id(), self.code(), date, url, |body| {
                    extract(body, date, config)
                })
                .await
        })
    }
}

/// Parse the TRM JSON array for `date`.
///
/// An empty array is the endpoint's way of saying nothing is published; the first record wins
/// otherwise. The quotation always carries the requested date.
pub fn extract(body: &str, date: Date, config: &SourceConfig) -> Extraction {
    let records: Vec<TrmRecord> = match serde_json::from_str(body) {
        Ok(records) => records,
        Err(error) => return Extraction::Structural(format!("invalid TRM payload: {error}")),
    };

    let Some(first) = records.first() else {
        return Extraction::NoData(Quotation::unavailable(
            date,
            &config.display_name,
            &config.code,
        ));
    };

    debug!(
        valid_from = first.vigenciadesde.as_deref().unwrap_or(""),
        valid_until = first.vigenciahasta.as_deref().unwrap_or(""),
        "TRM record located"
    );

    let sale = match &first.valor {
        serde_json::Value::String(raw) => parse_plain_decimal(raw),
        serde_json::Value::Number(number) => parse_plain_decimal(&number.to_string()),
        _ => None,
    };
    let Some(sale) = sale else {
        return Extraction::Structural(format!("unparseable TRM valor {}", first.valor));
    };

    Extraction::Found(Quotation::new(
        date,
        Some(sale),
        None,
        &config.display_name,
        &config.code,
    ))
}
