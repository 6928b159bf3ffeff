use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error and notice keys shared by every handler and the dispatcher.
pub mod keys {
    /// Requested code is not mapped to any handler.
    pub const INVALID_CURRENCY_CODE: &str = "invalid currency code";
    /// Source confirmed there is nothing published for the date. Informational only.
    pub const NO_DATA_FOR_DATE: &str = "no data for this date";
    /// Expected markup/payload shape not found, or the transport failed.
    pub const STRUCTURE_ERROR: &str = "html/structure error";
    /// Unexpected failure caught by the dispatcher.
    pub const INTERNAL_ERROR: &str = "internal error";
}

/// Keyed messages, one list per key.
pub type MessageMap = BTreeMap<String, Vec<String>>;

/// Success/failure envelope returned by handlers and the service.
///
/// `success()` holds only when an entity is present and no error was recorded. Notices are
/// informational and never affect success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<T>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: MessageMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notices: MessageMap,
}

impl<T> Default for OperationResult<T> {
    fn default() -> Self {
        Self {
            entity: None,
            errors: BTreeMap::new(),
            notices: BTreeMap::new(),
        }
    }
}

impl<T> OperationResult<T> {
    pub fn success(entity: T) -> Self {
        Self {
            entity: Some(entity),
            ..Self::default()
        }
    }

    pub fn failure(key: impl Into<String>, message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_error(key, message);
        result
    }

    pub fn is_success(&self) -> bool {
        self.entity.is_some() && self.errors.is_empty()
    }

    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(key.into()).or_default().push(message.into());
    }

    pub fn add_notice(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.notices.entry(key.into()).or_default().push(message.into());
    }

    pub fn with_notice(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_notice(key, message);
        self
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    pub fn into_entity(self) -> Option<T> {
        self.entity
    }
}
