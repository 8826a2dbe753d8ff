use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Costs, Provider};
use crate::utils::filter::{FieldValue, Record};

/// A cloud account registered in the inventory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub provider: Provider,
    #[serde(flatten)]
    pub costs: Costs,
    pub cluster_count: u32,
    pub last_scan_timestamp: Option<DateTime<Utc>>,
}

impl Record for Account {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "provider" => Some(FieldValue::text(self.provider.as_str())),
            "cluster_count" => Some(FieldValue::Number(f64::from(self.cluster_count))),
            "last_scan_timestamp" => self.last_scan_timestamp.map(|t| FieldValue::text(t.to_rfc3339())),
            other => self.costs.field(other).map(FieldValue::Number),
        }
    }
}
