//! Process configuration: one record per source, the transport policy and the optional
//! notification hook.
//!
//! Every section has built-in defaults pointing at the real sources, so an empty file (or no
//! file at all) yields a working configuration. Loaded once at startup and read-only after.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::retry::RetryConfig;

/// Overrides the notification webhook URL.
pub const ENV_NOTIFICATION_URL: &str = "CAMBIO_NOTIFICATION_URL";
/// Overrides `http.retryAttempts`.
pub const ENV_RETRY_ATTEMPTS: &str = "CAMBIO_RETRY_ATTEMPTS";

/// Settings for one external source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Base URL; each handler appends its own date parameter(s).
    pub url: String,
    /// Text (BNA) or table class (DOF) proving the page still has the expected layout.
    #[serde(default)]
    pub validation_marker: String,
    /// Message reported when the source confirms nothing is published for the date.
    #[serde(default)]
    pub no_data_marker: String,
    pub display_name: String,
    pub code: String,
}

impl SourceConfig {
    pub fn bna_default() -> Self {
        Self {
            url: String::from(
                "https://www.bna.com.ar/Cotizador/HistoricoPrincipales?id=billetes&filtroDolar=1&filtroEuro=0",
            ),
            validation_marker: String::from("Dolar U.S.A"),
            no_data_marker: String::from(
                "No hay cotización del Dolar U.S.A para la fecha solicitada",
            ),
            display_name: String::from("Peso Argentino"),
            code: String::from("ARS"),
        }
    }

    pub fn dof_default() -> Self {
        Self {
            url: String::from(
                "https://www.dof.gob.mx/indicadores_detalle.php?cod_tipo_indicador=158",
            ),
            validation_marker: String::from("Tabla_borde"),
            no_data_marker: String::from("No hay indicador publicado para la fecha solicitada"),
            display_name: String::from("Peso Mexicano"),
            code: String::from("MXN"),
        }
    }

    pub fn trm_default() -> Self {
        Self {
            url: String::from("https://www.datos.gov.co/resource/ceyp-9c7c.json?vigenciahasta="),
            validation_marker: String::new(),
            no_data_marker: String::from("No hay TRM publicada para la fecha solicitada"),
            display_name: String::from("Peso Colombiano"),
            code: String::from("COP"),
        }
    }

    fn validate(&self, source_name: &'static str) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.url).map_err(|error| ConfigError::InvalidUrl {
            source_name,
            url: self.url.clone(),
            reason: error.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                source_name,
                url: self.url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.display_name.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                source_name,
                field: "displayName",
            });
        }
        if self.code.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                source_name,
                field: "code",
            });
        }
        Ok(())
    }
}

/// One record per supported source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub bna: SourceConfig,
    pub dof: SourceConfig,
    pub trm: SourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            bna: SourceConfig::bna_default(),
            dof: SourceConfig::dof_default(),
            trm: SourceConfig::trm_default(),
        }
    }
}

/// Outbound transport policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpPolicyConfig {
    /// Retries after the first attempt.
    pub retry_attempts: u32,
    pub timeout_ms: u64,
    /// Spread each backoff wait over +/- 50% of its nominal value.
    pub retry_jitter: bool,
}

impl Default for HttpPolicyConfig {
    fn default() -> Self {
        Self {
            retry_attempts: 3,
            timeout_ms: 10_000,
            retry_jitter: false,
        }
    }
}

impl HttpPolicyConfig {
    pub fn retry_config(&self) -> RetryConfig {
        let mut config = RetryConfig::new(self.retry_attempts);
        if self.retry_jitter {
            config.backoff = config.backoff.with_jitter();
        }
        config
    }
}

/// Chat webhook used to alert humans when a source changes shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    pub url: String,
    /// Sent when a notification is raised with an empty message.
    #[serde(default)]
    pub text: String,
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub http: HttpPolicyConfig,
    pub sources: SourcesConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationConfig>,
}

impl AppConfig {
    /// Load from an optional JSON file, apply environment overrides, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let config = config.with_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in [`AppConfig::load`]).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_NOTIFICATION_URL).filter(|value| !value.trim().is_empty()) {
            let text = self
                .notification
                .take()
                .map(|notification| notification.text)
                .unwrap_or_default();
            self.notification = Some(NotificationConfig { url, text });
        }

        if let Some(raw) = lookup(ENV_RETRY_ATTEMPTS) {
            self.http.retry_attempts =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnv {
                        name: ENV_RETRY_ATTEMPTS,
                        value: raw.clone(),
                    })?;
        }

        Ok(self)
    }

    /// Source records must be usable; the notification hook is checked later and falls back to
    /// log-only delivery instead of failing startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sources.bna.validate("bna")?;
        self.sources.dof.validate("dof")?;
        self.sources.trm.validate("trm")?;

        if self.sources.bna.validation_marker.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                source_name: "bna",
                field: "validationMarker",
            });
        }
        if self.sources.dof.validation_marker.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                source_name: "dof",
                field: "validationMarker",
            });
        }
        Ok(())
    }
}
