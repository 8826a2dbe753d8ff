//! Inventory data model.
//!
//! Every entity here is a value object decoded from the inventory API. Nothing is
//! persisted locally: views fetch fresh copies and replace what they had.

pub mod account;
pub mod action;
pub mod cluster;
pub mod event;
pub mod instance;
pub mod overview;

pub use account::Account;
pub use action::{Action, ActionStatus, ActionTrigger, NewAction, Operation};
pub use cluster::{Cluster, ClusterStatus};
pub use event::{EventResult, SystemEvent};
pub use instance::{Instance, Tag};
pub use overview::Overview;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One page of a paginated list endpoint: `{count, items}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default)]
    pub count: usize,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: usize, items: Vec<T>) -> Self {
        Self { count, items }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            items: Vec::new(),
        }
    }
}

/// Cloud provider hosting an account, cluster or instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "Azure", alias = "AZURE")]
    Azure,
    #[serde(rename = "GCP")]
    Gcp,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Provider {
    pub const ALL: [Provider; 4] = [Provider::Aws, Provider::Azure, Provider::Gcp, Provider::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Azure => "Azure",
            Provider::Gcp => "GCP",
            Provider::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost aggregates shared by accounts, clusters and instances.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Costs {
    pub last_15_days_cost: f64,
    pub current_month_cost: f64,
    pub last_month_cost: f64,
    pub total_cost: f64,
}

impl Costs {
    /// Numeric value of a cost column by its field name.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "last_15_days_cost" => Some(self.last_15_days_cost),
            "current_month_cost" => Some(self.current_month_cost),
            "last_month_cost" => Some(self.last_month_cost),
            "total_cost" => Some(self.total_cost),
            _ => None,
        }
    }
}
