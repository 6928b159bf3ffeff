//! CLI argument definitions for cambio.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Quotation of one currency for one date |
//! | `sources` | List registered currency codes and their sources |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | built-in defaults | JSON configuration file |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-level` | `RUST_LOG`, else `info` | Tracing filter for stderr logs |
//!
//! # Examples
//!
//! ```bash
//! cambio quote ARS 2020-02-05
//! cambio quote mxn 2020-02-05 --pretty
//! cambio --config cambio.json sources
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Daily USD quotations for ARS, MXN and COP from their publishing sources.
#[derive(Debug, Parser)]
#[command(name = "cambio", author, version, about)]
pub struct Cli {
    /// JSON configuration file; built-in source defaults are used when omitted.
    #[arg(long, global = true, env = "CAMBIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log filter (e.g. `debug`, `cambio_core=trace`). Logs go to stderr.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quotation of one currency for one date.
    ///
    /// Exit code 0 prints the quotation, 3 prints the failed result with its error keys.
    ///
    /// # Examples
    ///
    ///   cambio quote ARS 2020-02-05
    ///   cambio quote 3 2020-02-05
    Quote(QuoteArgs),

    /// List registered currency codes, their sources and URLs.
    Sources,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Currency code (ARS, MXN, COP) or its numeric id (1, 2, 3).
    pub code: String,

    /// Calendar date as yyyy-MM-dd; must not be in the future.
    pub date: String,
}
