mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use std::process::ExitCode;
use time::Date;

use crate::cli::Cli;
use crate::error::CliError;

const FAILED_RESULT: u8 = 3;

fn main() -> ExitCode {
    // The local offset can only be read while the process is single-threaded.
    let today = commands::local_today();

    let cli = Cli::parse();
    if let Err(error) = logging::init(cli.log_level.as_deref()) {
        eprintln!("warning: logging disabled: {error}");
    }

    match run(&cli, today) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(cli: &Cli, today: Date) -> Result<ExitCode, CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(commands::run(cli, today))?;
    output::render(&result.data, cli.pretty)?;

    if !result.success {
        return Ok(ExitCode::from(FAILED_RESULT));
    }

    Ok(ExitCode::SUCCESS)
}
