//! Scheduled power actions.
//!
//! Only the `scheduled_action` and `cron_action` kinds are persisted by the
//! server. Instant power changes go straight to the cluster power endpoints and
//! never become an [`Action`]; see [`crate::schedule::ActionDraft`] for the full
//! three-way model used while drafting.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::filter::{FieldValue, Record};

/// Wire tag of a one-shot action.
pub const SCHEDULED_ACTION_TYPE: &str = "scheduled_action";
/// Wire tag of a recurring action.
pub const CRON_ACTION_TYPE: &str = "cron_action";

/// Requested power transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    PowerOn,
    PowerOff,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::PowerOn => "PowerOn",
            Operation::PowerOff => "PowerOff",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operation::PowerOn => "Power on",
            Operation::PowerOff => "Power off",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution status computed by the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    Pending,
    Success,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Pending => "Pending",
            ActionStatus::Success => "Success",
            ActionStatus::Failed => "Failed",
            ActionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a persisted action fires. Exactly one of `time` or `cronExpression`
/// exists on the wire, selected by the `type` tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionTrigger {
    #[serde(rename = "scheduled_action")]
    Scheduled { time: DateTime<FixedOffset> },
    #[serde(rename = "cron_action")]
    Cron {
        #[serde(rename = "cronExpression")]
        cron_expression: String,
    },
}

impl ActionTrigger {
    pub fn type_tag(&self) -> &'static str {
        match self {
            ActionTrigger::Scheduled { .. } => SCHEDULED_ACTION_TYPE,
            ActionTrigger::Cron { .. } => CRON_ACTION_TYPE,
        }
    }

    /// Human readable schedule: the timestamp or the cron expression.
    pub fn describe(&self) -> String {
        match self {
            ActionTrigger::Scheduled { time } => time.to_rfc3339(),
            ActionTrigger::Cron { cron_expression } => cron_expression.clone(),
        }
    }
}

/// A persisted scheduled or cron action as returned by `/schedule`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub cluster_id: String,
    pub operation: Operation,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub region: String,
    #[serde(flatten)]
    pub trigger: ActionTrigger,
}

impl Action {
    pub fn type_tag(&self) -> &'static str {
        self.trigger.type_tag()
    }
}

impl Record for Action {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "type" => Some(FieldValue::text(self.type_tag())),
            "account_id" => Some(FieldValue::text(&self.account_id)),
            "cluster_id" => Some(FieldValue::text(&self.cluster_id)),
            "operation" => Some(FieldValue::text(self.operation.as_str())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "enabled" => Some(FieldValue::text(if self.enabled { "true" } else { "false" })),
            "region" => Some(FieldValue::text(&self.region)),
            "schedule" => Some(FieldValue::text(self.trigger.describe())),
            "time" => match &self.trigger {
                ActionTrigger::Scheduled { time } => Some(FieldValue::text(time.to_rfc3339())),
                ActionTrigger::Cron { .. } => None,
            },
            "cron_expression" => match &self.trigger {
                ActionTrigger::Cron { cron_expression } => Some(FieldValue::text(cron_expression)),
                ActionTrigger::Scheduled { .. } => None,
            },
            _ => None,
        }
    }
}

/// Creation payload for `POST /schedule`. The endpoint takes a batch, so
/// callers send a slice even for one action.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAction {
    pub account_id: String,
    pub cluster_id: String,
    pub operation: Operation,
    pub region: String,
    pub status: ActionStatus,
    pub enabled: bool,
    #[serde(flatten)]
    pub trigger: ActionTrigger,
}

impl NewAction {
    /// A pending, enabled action for the given target.
    pub fn new(
        account_id: impl Into<String>,
        cluster_id: impl Into<String>,
        region: impl Into<String>,
        operation: Operation,
        trigger: ActionTrigger,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            cluster_id: cluster_id.into(),
            operation,
            region: region.into(),
            status: ActionStatus::Pending,
            enabled: true,
            trigger,
        }
    }
}
