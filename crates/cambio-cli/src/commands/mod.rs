mod quote;
mod sources;

use cambio_core::{AppConfig, CurrencyService, HandlerRegistryBuilder};
use serde_json::Value;
use time::{Date, OffsetDateTime};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Rendered payload plus whether the command achieved what was asked.
pub struct CommandResult {
    pub data: Value,
    pub success: bool,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            success: true,
        }
    }

    pub fn failed(data: Value) -> Self {
        Self {
            data,
            success: false,
        }
    }
}

/// Today's calendar date in the local offset, falling back to UTC when the offset is unknown.
pub fn local_today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

pub async fn run(cli: &Cli, today: Date) -> Result<CommandResult, CliError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let registry = HandlerRegistryBuilder::new(config)
        .with_real_clients()
        .build();
    let service = CurrencyService::new(registry);

    match &cli.command {
        Command::Quote(args) => quote::run(args, &service, today).await,
        Command::Sources => sources::run(&service),
    }
}
