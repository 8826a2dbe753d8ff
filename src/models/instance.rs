use serde::{Deserialize, Serialize};

use super::{ClusterStatus, Costs, Provider};
use crate::utils::filter::{FieldValue, Record};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A server instance belonging to a cluster.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub instance_type: String,
    pub availability_zone: String,
    pub cluster_id: String,
    pub cluster_name: String,
    pub status: ClusterStatus,
    pub provider: Provider,
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub costs: Costs,
}

impl Instance {
    /// Value of a tag by key, if present.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.iter().find(|t| t.key == key).map(|t| t.value.as_str())
    }
}

impl Record for Instance {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "instance_type" => Some(FieldValue::text(&self.instance_type)),
            "availability_zone" => Some(FieldValue::text(&self.availability_zone)),
            "cluster_id" => Some(FieldValue::text(&self.cluster_id)),
            "cluster_name" => Some(FieldValue::text(&self.cluster_name)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "provider" => Some(FieldValue::text(self.provider.as_str())),
            other => self.costs.field(other).map(FieldValue::Number),
        }
    }
}

impl Record for Tag {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "key" => Some(FieldValue::text(&self.key)),
            "value" => Some(FieldValue::text(&self.value)),
            _ => None,
        }
    }
}
