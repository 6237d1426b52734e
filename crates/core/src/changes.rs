#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured diff payload attached to a card activity. At most two top
/// level keys, `from` and `to`, each holding only the fields relevant to
/// the activity's event type. Timestamp values are pre-rendered as
/// `YYYY-MM-DD HH:MM:SS` strings by the caller; everything else keeps its
/// natural scalar type. Downstream consumers parse this verbatim, so the
/// serialized shape is a contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Changes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<BTreeMap<String, Value>>,
}

impl Changes {
    pub fn to_only() -> Self {
        Self {
            from: None,
            to: Some(BTreeMap::new()),
        }
    }

    pub fn from_to() -> Self {
        Self {
            from: Some(BTreeMap::new()),
            to: Some(BTreeMap::new()),
        }
    }

    pub fn set_from(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.from
            .get_or_insert_with(BTreeMap::new)
            .insert(field.to_string(), value.into());
        self
    }

    pub fn set_to(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.to
            .get_or_insert_with(BTreeMap::new)
            .insert(field.to_string(), value.into());
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
