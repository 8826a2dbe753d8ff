use serde::{Deserialize, Serialize};

/// Inventory-wide totals from `/overview`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub account_count: u32,
    pub cluster_count: u32,
    pub running_cluster_count: u32,
    pub instance_count: u32,
    pub total_cost: f64,
    pub current_month_cost: f64,
}
