use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Costs, Provider};
use crate::utils::filter::{FieldValue, Record};

/// Power state reported by the inventory. The client never transitions it locally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterStatus {
    Running,
    Stopped,
    Terminated,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ClusterStatus {
    pub const ALL: [ClusterStatus; 4] = [
        ClusterStatus::Running,
        ClusterStatus::Stopped,
        ClusterStatus::Terminated,
        ClusterStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterStatus::Running => "Running",
            ClusterStatus::Stopped => "Stopped",
            ClusterStatus::Terminated => "Terminated",
            ClusterStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub id: String,
    pub name: String,
    pub provider: Provider,
    pub region: String,
    pub status: ClusterStatus,
    pub console_link: Option<String>,
    pub account_id: String,
    pub account_name: String,
    pub instance_count: u32,
    #[serde(flatten)]
    pub costs: Costs,
    pub created_at: Option<DateTime<Utc>>,
    pub last_scan_timestamp: Option<DateTime<Utc>>,
}

impl Record for Cluster {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "provider" => Some(FieldValue::text(self.provider.as_str())),
            "region" => Some(FieldValue::text(&self.region)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "account_id" => Some(FieldValue::text(&self.account_id)),
            "account_name" => Some(FieldValue::text(&self.account_name)),
            "instance_count" => Some(FieldValue::Number(f64::from(self.instance_count))),
            "created_at" => self.created_at.map(|t| FieldValue::text(t.to_rfc3339())),
            "last_scan_timestamp" => self.last_scan_timestamp.map(|t| FieldValue::text(t.to_rfc3339())),
            other => self.costs.field(other).map(FieldValue::Number),
        }
    }
}
