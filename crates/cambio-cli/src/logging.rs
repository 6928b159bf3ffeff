use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// `--log-level` wins over `RUST_LOG`, which wins over the default.
pub fn filter_directive(flag: Option<&str>, env: Option<String>) -> String {
    flag.map(str::to_owned)
        .or(env)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| String::from(DEFAULT_FILTER))
}

/// Install the stderr subscriber. Stdout is reserved for JSON output.
pub fn init(flag: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let directive = filter_directive(flag, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
