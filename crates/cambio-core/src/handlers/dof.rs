//! Diario Oficial de la Federación: USD/MXN from the indicator detail table.

use scraper::Html;
use time::Date;

use super::parsing::{cell_text, normalize_dot_decimal, parse_comma_decimal, selector};
use super::{Extraction, HandlerContext, HandlerFuture, SourceError, SourceHandler};
use crate::config::SourceConfig;
use crate::domain::{dates, CurrencyCode, Quotation};
use crate::source::SourceId;

const DATE_CELL: usize = 2;
const VALUE_CELL: usize = 3;
const EXPECTED_CELLS: usize = 4;

pub struct DofHandler {
    context: HandlerContext,
}

impl DofHandler {
    pub fn new(context: HandlerContext) -> Self {
        Self { context }
    }

    /// `{url}&dfecha={dd/MM/yyyy}&hfecha={dd/MM/yyyy}`, a one-day range.
    pub fn request_url(&self, date: Date) -> Result<String, SourceError> {
        let day = dates::padded_slashed(date)?;
        let encoded = urlencoding::encode(&day);
        Ok(format!(
            "{}&dfecha={encoded}&hfecha={encoded}",
            self.context.config().url
        ))
    }
}

impl SourceHandler for DofHandler {
    fn id(&self) -> SourceId {
        SourceId::Dof
    }

    fn code(&self) -> CurrencyCode {
        CurrencyCode::Mxn
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

/// Parse a DOF indicator page for `date`. The page carries no buy value.
pub fn extract(body: &str, date: Date, config: &SourceConfig) -> Extraction {
    try_extract(body, date, config).unwrap_or_else(Extraction::Structural)
}

fn try_extract(body: &str, date: Date, config: &SourceConfig) -> Result<Extraction, String> {
    let document = Html::parse_document(body);
    let marker = config.validation_marker.trim();

    let table = document
        .select(&selector("table")?)
        .find(|table| table.value().classes().any(|class| class == marker))
        .ok_or_else(|| format!("table with class '{marker}' not found"))?;

    let cells: Vec<String> = table.select(&selector("td")?).map(cell_text).collect();
    if cells.len() != EXPECTED_CELLS {
        return Err(format!(
            "expected {EXPECTED_CELLS} cells in the indicator table, found {}",
            cells.len()
        ));
    }

    let wanted = dates::padded_dashed(date).map_err(|error| error.to_string())?;
    if cells[DATE_CELL] != wanted {
        return Err(format!(
            "indicator table is dated '{}', expected {wanted}",
            cells[DATE_CELL]
        ));
    }

    let raw = &cells[VALUE_CELL];
    let sale = parse_comma_decimal(&normalize_dot_decimal(raw))
        .ok_or_else(|| format!("unparseable sale value '{raw}'"))?;

    Ok(Extraction::Found(Quotation::new(
        date,
        Some(sale),
        None,
        &config.display_name,
        &config.code,
    )))
}
