use thiserror::Error;

/// Validation errors for external input handed to the core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid currency code '{value}', expected one of ARS, MXN, COP (or 1, 2, 3)")]
    InvalidCurrencyCode { value: String },

    #[error("date must be formatted as yyyy-MM-dd: '{value}'")]
    InvalidDate { value: String },

    #[error("date {value} is in the future")]
    FutureDate { value: String },
}

/// Errors raised while loading or validating [`crate::AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("source '{source_name}' has an invalid url '{url}': {reason}")]
    InvalidUrl {
        source_name: &'static str,
        url: String,
        reason: String,
    },

    #[error("source '{source_name}' field '{field}' cannot be empty")]
    EmptyField {
        source_name: &'static str,
        field: &'static str,
    },

    #[error("environment variable {name} has an invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}
