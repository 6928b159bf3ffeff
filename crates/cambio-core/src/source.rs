use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifiers of the external sites/APIs a handler talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    /// Banco de la Nación Argentina quotation table.
    Bna,
    /// Diario Oficial de la Federación indicator table.
    Dof,
    /// datos.gov.co TRM statistics endpoint.
    Trm,
}

impl SourceId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bna => "bna",
            Self::Dof => "dof",
            Self::Trm => "trm",
        }
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
