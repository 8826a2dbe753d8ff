//! Cluster power actions: drafting and submission.
//!
//! An operator picks a target (account, then cluster), an [`Operation`], and
//! an execution mode. The three modes are a closed sum type all the way down,
//! so a draft can never carry both a timestamp and a cron expression:
//!
//! - while editing, [`ExecutionDraft`] holds the raw inputs of one mode only;
//! - once valid, it resolves to an [`ActionDraft`];
//! - submitting turns that into a [`Submission`]: an immediate power call, or
//!   a [`NewAction`] for the schedule endpoint.
//!
//! [`ScheduleForm`] is the dialog state machine driving all of this.

pub mod form;

pub use form::{FormEffect, FormMsg, FormStep, ScheduleForm};

use chrono::{DateTime, FixedOffset};

use crate::models::{ActionTrigger, NewAction, Operation};
use crate::utils::cron::{CronError, CronExpression};
use crate::utils::datetime::{compose_schedule_time, ScheduleTimeError};

/// Timezone preselected in the schedule picker.
pub const DEFAULT_TIMEZONE: &str = "UTC";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("no account selected")]
    MissingAccount,

    #[error("no cluster selected")]
    MissingCluster,

    #[error("no operation selected")]
    MissingOperation,

    #[error("no execution mode selected")]
    MissingMode,

    #[error(transparent)]
    Time(#[from] ScheduleTimeError),

    #[error("invalid cron expression: {0}")]
    Cron(#[from] CronError),
}

/// Which execution mode is chosen, without its inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    Immediate,
    Scheduled,
    Cron,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 3] = [ExecutionMode::Immediate, ExecutionMode::Scheduled, ExecutionMode::Cron];

    pub fn label(&self) -> &'static str {
        match self {
            ExecutionMode::Immediate => "Now",
            ExecutionMode::Scheduled => "At a time",
            ExecutionMode::Cron => "Recurring (cron)",
        }
    }
}

/// Raw inputs of the chosen execution mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionDraft {
    Immediate,
    Scheduled {
        date: String,
        time: String,
        timezone: String,
    },
    Cron {
        expression: String,
    },
}

impl ExecutionDraft {
    /// Fresh, empty inputs for `mode`.
    pub fn for_mode(mode: ExecutionMode) -> Self {
        match mode {
            ExecutionMode::Immediate => ExecutionDraft::Immediate,
            ExecutionMode::Scheduled => ExecutionDraft::Scheduled {
                date: String::new(),
                time: String::new(),
                timezone: DEFAULT_TIMEZONE.to_string(),
            },
            ExecutionMode::Cron => ExecutionDraft::Cron {
                expression: String::new(),
            },
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            ExecutionDraft::Immediate => ExecutionMode::Immediate,
            ExecutionDraft::Scheduled { .. } => ExecutionMode::Scheduled,
            ExecutionDraft::Cron { .. } => ExecutionMode::Cron,
        }
    }

    /// Validate the inputs.
    pub fn resolve(&self) -> Result<ActionDraft, ScheduleError> {
        match self {
            ExecutionDraft::Immediate => Ok(ActionDraft::Instant),
            ExecutionDraft::Scheduled { date, time, timezone } => Ok(ActionDraft::Scheduled {
                time: compose_schedule_time(date, time, timezone)?,
            }),
            ExecutionDraft::Cron { expression } => Ok(ActionDraft::Cron {
                expression: CronExpression::parse(expression)?,
            }),
        }
    }
}

/// A validated execution choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionDraft {
    Instant,
    Scheduled { time: DateTime<FixedOffset> },
    Cron { expression: CronExpression },
}

impl ActionDraft {
    /// Trigger to persist, or `None` for an instant action which is never stored.
    pub fn trigger(&self) -> Option<ActionTrigger> {
        match self {
            ActionDraft::Instant => None,
            ActionDraft::Scheduled { time } => Some(ActionTrigger::Scheduled { time: *time }),
            ActionDraft::Cron { expression } => Some(ActionTrigger::Cron {
                cron_expression: expression.to_string(),
            }),
        }
    }
}

/// What the form hands to the service.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// Call the cluster power endpoint right away.
    PowerNow { cluster_id: String, operation: Operation },
    /// Persist a scheduled or cron action.
    Create(NewAction),
}

impl Submission {
    pub fn describe(&self) -> String {
        match self {
            Submission::PowerNow { cluster_id, operation } => {
                format!("{} cluster {}", operation.label(), cluster_id)
            }
            Submission::Create(action) => format!(
                "{} cluster {} ({})",
                action.operation.label(),
                action.cluster_id,
                action.trigger.describe()
            ),
        }
    }
}
