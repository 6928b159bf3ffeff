use serde::Serialize;

use cambio_core::{CurrencyService, SourceSnapshot};

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SourcesResponseData {
    sources: Vec<SourceSnapshot>,
}

pub fn run(service: &CurrencyService) -> Result<CommandResult, CliError> {
    let sources = service.registry().snapshots();
    let data = serde_json::to_value(SourcesResponseData { sources })?;
    Ok(CommandResult::ok(data))
}
