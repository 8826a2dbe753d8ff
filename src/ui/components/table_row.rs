//! How each resource appears as a table row.

use ratatui::{layout::Constraint, style::Color};

use crate::models::action::{CRON_ACTION_TYPE, SCHEDULED_ACTION_TYPE};
use crate::models::{Account, Action, ActionStatus, ActionTrigger, Cluster, ClusterStatus, EventResult, Instance, SystemEvent};
use crate::utils::datetime::{format_cost, format_timestamp};
use crate::utils::filter::Record;

/// One table column: header text, the record field it sorts on, and its width.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub title: &'static str,
    pub field: &'static str,
    pub width: Constraint,
}

const fn column(title: &'static str, field: &'static str, width: Constraint) -> Column {
    Column { title, field, width }
}

pub trait TableRow: Record + Clone {
    fn columns() -> &'static [Column];

    /// Fields the search box matches against.
    fn search_fields() -> &'static [&'static str];

    /// Values offered by the status filter menu; empty hides the menu.
    fn status_options() -> Vec<String> {
        Vec::new()
    }

    fn has_provider() -> bool {
        false
    }

    fn has_action_type() -> bool {
        false
    }

    fn id(&self) -> &str;

    /// Rendered cell text, one per column.
    fn cells(&self) -> Vec<String>;

    /// Row tint, if the row's state deserves one.
    fn color(&self) -> Option<Color> {
        None
    }
}

fn cluster_status_color(status: ClusterStatus) -> Option<Color> {
    match status {
        ClusterStatus::Running => Some(Color::Green),
        ClusterStatus::Stopped => Some(Color::Yellow),
        ClusterStatus::Terminated => Some(Color::DarkGray),
        ClusterStatus::Unknown => None,
    }
}

fn cluster_statuses() -> Vec<String> {
    ClusterStatus::ALL.iter().map(|s| s.as_str().to_string()).collect()
}

impl TableRow for Account {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            column("Name", "name", Constraint::Min(20)),
            column("Provider", "provider", Constraint::Length(9)),
            column("Clusters", "cluster_count", Constraint::Length(9)),
            column("Month", "current_month_cost", Constraint::Length(12)),
            column("Last 15d", "last_15_days_cost", Constraint::Length(12)),
            column("Total", "total_cost", Constraint::Length(13)),
            column("Last scan", "last_scan_timestamp", Constraint::Length(22)),
        ];
        COLUMNS
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "id", "provider"]
    }

    fn has_provider() -> bool {
        true
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.provider.to_string(),
            self.cluster_count.to_string(),
            format_cost(self.costs.current_month_cost),
            format_cost(self.costs.last_15_days_cost),
            format_cost(self.costs.total_cost),
            format_timestamp(self.last_scan_timestamp.as_ref()),
        ]
    }
}

impl TableRow for Cluster {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            column("Name", "name", Constraint::Min(20)),
            column("Account", "account_name", Constraint::Min(14)),
            column("Provider", "provider", Constraint::Length(9)),
            column("Region", "region", Constraint::Length(14)),
            column("Status", "status", Constraint::Length(11)),
            column("Nodes", "instance_count", Constraint::Length(6)),
            column("Month", "current_month_cost", Constraint::Length(12)),
            column("Last scan", "last_scan_timestamp", Constraint::Length(22)),
        ];
        COLUMNS
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "id", "account_name", "region"]
    }

    fn status_options() -> Vec<String> {
        cluster_statuses()
    }

    fn has_provider() -> bool {
        true
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.account_name.clone(),
            self.provider.to_string(),
            self.region.clone(),
            self.status.to_string(),
            self.instance_count.to_string(),
            format_cost(self.costs.current_month_cost),
            format_timestamp(self.last_scan_timestamp.as_ref()),
        ]
    }

    fn color(&self) -> Option<Color> {
        cluster_status_color(self.status)
    }
}

impl TableRow for Instance {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            column("Name", "name", Constraint::Min(20)),
            column("Type", "instance_type", Constraint::Length(14)),
            column("Zone", "availability_zone", Constraint::Length(14)),
            column("Cluster", "cluster_name", Constraint::Min(14)),
            column("Provider", "provider", Constraint::Length(9)),
            column("Status", "status", Constraint::Length(11)),
            column("Month", "current_month_cost", Constraint::Length(12)),
        ];
        COLUMNS
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "id", "instance_type", "cluster_name", "availability_zone"]
    }

    fn status_options() -> Vec<String> {
        cluster_statuses()
    }

    fn has_provider() -> bool {
        true
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.instance_type.clone(),
            self.availability_zone.clone(),
            self.cluster_name.clone(),
            self.provider.to_string(),
            self.status.to_string(),
            format_cost(self.costs.current_month_cost),
        ]
    }

    fn color(&self) -> Option<Color> {
        cluster_status_color(self.status)
    }
}

impl TableRow for Action {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            column("Cluster", "cluster_id", Constraint::Min(16)),
            column("Operation", "operation", Constraint::Length(11)),
            column("Type", "type", Constraint::Length(17)),
            column("When", "schedule", Constraint::Min(26)),
            column("Region", "region", Constraint::Length(14)),
            column("Status", "status", Constraint::Length(9)),
            column("Enabled", "enabled", Constraint::Length(8)),
        ];
        COLUMNS
    }

    fn search_fields() -> &'static [&'static str] {
        &["cluster_id", "account_id", "operation", "region", "schedule"]
    }

    fn status_options() -> Vec<String> {
        [ActionStatus::Pending, ActionStatus::Success, ActionStatus::Failed]
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    fn has_action_type() -> bool {
        true
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        let when = match &self.trigger {
            ActionTrigger::Scheduled { time } => time.format("%Y-%m-%d %H:%M %:z").to_string(),
            ActionTrigger::Cron { cron_expression } => cron_expression.clone(),
        };
        vec![
            self.cluster_id.clone(),
            self.operation.label().to_string(),
            self.type_tag().to_string(),
            when,
            self.region.clone(),
            self.status.to_string(),
            if self.enabled { "yes" } else { "no" }.to_string(),
        ]
    }

    fn color(&self) -> Option<Color> {
        if !self.enabled {
            return Some(Color::DarkGray);
        }
        match self.status {
            ActionStatus::Failed => Some(Color::Red),
            ActionStatus::Success => Some(Color::Green),
            _ => None,
        }
    }
}

impl TableRow for SystemEvent {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            column("Time", "timestamp", Constraint::Length(22)),
            column("Action", "action", Constraint::Length(14)),
            column("Result", "result", Constraint::Length(9)),
            column("Resource", "resource", Constraint::Min(16)),
            column("By", "triggered_by", Constraint::Min(14)),
            column("Description", "description", Constraint::Min(20)),
        ];
        COLUMNS
    }

    fn search_fields() -> &'static [&'static str] {
        &["action", "resource", "triggered_by", "description"]
    }

    fn status_options() -> Vec<String> {
        [EventResult::Success, EventResult::Failed, EventResult::Warning]
            .iter()
            .map(|r| r.as_str().to_string())
            .collect()
    }

    fn has_provider() -> bool {
        true
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_timestamp(self.timestamp.as_ref()),
            self.action.clone(),
            self.result.to_string(),
            self.resource.clone(),
            self.triggered_by.clone(),
            self.description.clone(),
        ]
    }

    fn color(&self) -> Option<Color> {
        match self.result {
            EventResult::Failed => Some(Color::Red),
            EventResult::Warning => Some(Color::Yellow),
            _ => None,
        }
    }
}

/// Action-type menu values, in wire form.
pub fn action_type_options() -> Vec<String> {
    vec![SCHEDULED_ACTION_TYPE.to_string(), CRON_ACTION_TYPE.to_string()]
}
