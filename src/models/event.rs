use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Provider;
use crate::utils::filter::{FieldValue, Record};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventResult {
    Success,
    Failed,
    Warning,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventResult::Success => "Success",
            EventResult::Failed => "Failed",
            EventResult::Warning => "Warning",
            EventResult::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EventResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit log entry produced by the inventory server. Read-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemEvent {
    pub id: String,
    pub action: String,
    pub result: EventResult,
    pub severity: String,
    pub resource: String,
    pub resource_type: String,
    pub triggered_by: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub description: String,
    pub account_id: Option<String>,
    pub provider: Option<Provider>,
}

impl Record for SystemEvent {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "action" => Some(FieldValue::text(&self.action)),
            "result" | "status" => Some(FieldValue::text(self.result.as_str())),
            "severity" => Some(FieldValue::text(&self.severity)),
            "resource" => Some(FieldValue::text(&self.resource)),
            "resource_type" => Some(FieldValue::text(&self.resource_type)),
            "triggered_by" => Some(FieldValue::text(&self.triggered_by)),
            "timestamp" => self.timestamp.map(|t| FieldValue::text(t.to_rfc3339())),
            "description" => Some(FieldValue::text(&self.description)),
            "account_id" => self.account_id.as_deref().map(FieldValue::text),
            "provider" => self.provider.map(|p| FieldValue::text(p.as_str())),
            _ => None,
        }
    }
}
