use cambio_core::domain::dates;
use cambio_core::{CurrencyService, ValidationError};
use time::Date;

use crate::cli::QuoteArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(
    args: &QuoteArgs,
    service: &CurrencyService,
    today: Date,
) -> Result<CommandResult, CliError> {
    let date = dates::parse_iso_date(&args.date)?;
    ensure_not_future(date, today)?;

    let result = service.get_quotation_raw(date, &args.code).await;
    if result.is_success() {
        Ok(CommandResult::ok(serde_json::to_value(result.into_entity())?))
    } else {
        Ok(CommandResult::failed(serde_json::to_value(&result)?))
    }
}

fn ensure_not_future(date: Date, today: Date) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::FutureDate {
            value: date.to_string(),
        });
    }
    Ok(())
}
