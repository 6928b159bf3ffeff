//! Banco de la Nación Argentina: USD/ARS from the historical quotation HTML table.

use scraper::Html;
use time::Date;

use super::parsing::{cell_text, parse_comma_decimal, selector};
use super::{Extraction, HandlerContext, HandlerFuture, SourceError, SourceHandler};
use crate::config::SourceConfig;
use crate::domain::{dates, CurrencyCode, Quotation};
use crate::source::SourceId;

pub struct BnaHandler {
    context: HandlerContext,
}

impl BnaHandler {
    pub fn new(context: HandlerContext) -> Self {
        Self { context }
    }

    /// `{url}&fecha={dd/MM/yyyy}`
    pub fn request_url(&self, date: Date) -> Result<String, SourceError> {
        let day = dates::padded_slashed(date)?;
        Ok(format!(
            "{}&fecha={}",
            self.context.config().url,
            urlencoding::encode(&day)
        ))
    }
}

impl SourceHandler for BnaHandler {
    fn id(&self) -> SourceId {
        SourceId::Bna
    }

    fn code(&self) -> CurrencyCode {
        CurrencyCode::Ars
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

/// Parse a BNA history page for `date`.
pub fn extract(body: &str, date: Date, config: &SourceConfig) -> Extraction {
    try_extract(body, date, config).unwrap_or_else(Extraction::Structural)
}

fn try_extract(body: &str, date: Date, config: &SourceConfig) -> Result<Extraction, String> {
    let document = Html::parse_document(body);

    if document.select(&selector(".sinResultados")?).next().is_some() {
        return Ok(Extraction::NoData(Quotation::unavailable(
            date,
            &config.display_name,
            &config.code,
        )));
    }

    let row = selector("tr")?;
    let cell = selector("td")?;

    let header = document
        .select(&row)
        .nth(1)
        .ok_or_else(|| String::from("validation row not found"))?;
    let marker = header.select(&cell).next().map(cell_text);
    if marker.as_deref() != Some(config.validation_marker.trim()) {
        return Err(format!(
            "validation row does not start with '{}'",
            config.validation_marker.trim()
        ));
    }

    let wanted = dates::unpadded_slashed(date).map_err(|error| error.to_string())?;
    let matched = document
        .select(&selector("table > tbody > tr")?)
        .find(|candidate| {
            candidate.select(&cell).nth(3).map(cell_text).as_deref() == Some(wanted.as_str())
        })
        .ok_or_else(|| format!("no row dated {wanted}"))?;

    let columns: Vec<String> = matched.select(&cell).map(cell_text).collect();
    let (Some(buy), Some(sale), Some(_)) = (columns.get(1), columns.get(2), columns.get(3)) else {
        return Err(format!("row dated {wanted} is missing cells"));
    };

    let buy = parse_comma_decimal(buy).ok_or_else(|| format!("unparseable buy value '{buy}'"))?;
    let sale =
        parse_comma_decimal(sale).ok_or_else(|| format!("unparseable sale value '{sale}'"))?;

    Ok(Extraction::Found(Quotation::new(
        date,
        Some(sale),
        Some(buy),
        &config.display_name,
        &config.code,
    )))
}
