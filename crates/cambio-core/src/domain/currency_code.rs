use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Closed set of currencies the service can quote against the US dollar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CurrencyCode {
    /// Argentine peso.
    Ars,
    /// Mexican peso.
    Mxn,
    /// Colombian peso.
    Cop,
}

impl CurrencyCode {
    pub const ALL: [Self; 3] = [Self::Ars, Self::Mxn, Self::Cop];

    /// Parse a code case-insensitively.
    ///
    /// The numeric identifiers published by the public API (`1` = ARS, `2` = MXN, `3` = COP)
    /// are accepted as well.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_uppercase().as_str() {
            "ARS" | "1" => Ok(Self::Ars),
            "MXN" | "2" => Ok(Self::Mxn),
            "COP" | "3" => Ok(Self::Cop),
            _ => Err(ValidationError::InvalidCurrencyCode {
                value: input.trim().to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ars => "ARS",
            Self::Mxn => "MXN",
            Self::Cop => "COP",
        }
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.as_str().to_owned()
    }
}
