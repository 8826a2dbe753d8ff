use crate::models::{Account, Action as ScheduledAction, Cluster, Instance, Operation, Overview, SystemEvent};
use crate::schedule::FormMsg;
use crate::service::actions::RowAction;
use crate::service::resources::ClusterDetail;

/// The top-level screens, one per inventory collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    Accounts,
    #[default]
    Clusters,
    Instances,
    Schedules,
    Events,
}

impl View {
    pub const ALL: [View; 5] = [View::Accounts, View::Clusters, View::Instances, View::Schedules, View::Events];

    /// Config name
    pub fn name(&self) -> &'static str {
        match self {
            View::Accounts => "accounts",
            View::Clusters => "clusters",
            View::Instances => "instances",
            View::Schedules => "schedules",
            View::Events => "events",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Accounts => "Accounts",
            View::Clusters => "Clusters",
            View::Instances => "Servers",
            View::Schedules => "Schedules",
            View::Events => "Events",
        }
    }

    pub fn from_name(name: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn index(&self) -> usize {
        View::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn next(&self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn previous(&self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SwitchView(View),
    NextView,
    PreviousView,

    // Loading
    Reload(View),
    AccountsLoaded { epoch: u64, accounts: Vec<Account> },
    ClustersLoaded { epoch: u64, clusters: Vec<Cluster> },
    InstancesLoaded { epoch: u64, instances: Vec<Instance> },
    ActionsLoaded { epoch: u64, actions: Vec<ScheduledAction> },
    EventsLoaded { epoch: u64, events: Vec<SystemEvent> },
    OverviewLoaded(Overview),
    LoadFailed { view: View, epoch: u64, message: String },

    // List pipeline
    SearchChanged { view: View, query: String },
    SearchCommitted { view: View, query: String },

    // Cluster operations
    PowerCluster { cluster_id: String, operation: Operation },
    ShowClusterDetail(String),
    ClusterDetailLoaded(Box<ClusterDetail>),
    ShowInstanceDetail(String),
    InstanceDetailLoaded(Box<Instance>),

    // Power action dialog
    Schedule(FormMsg),

    // Scheduled action rows
    ApplyRowAction { action_id: String, row_action: RowAction },
    /// The server refused a row operation started under `epoch`.
    RowActionFailed { epoch: u64, message: String },

    // UI operations
    ShowDialog(DialogType),
    HideDialog,
    ShowInfo(String),
    ShowError(String),

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone)]
pub enum DialogType {
    Schedule,
    ConfirmPower {
        cluster_id: String,
        cluster_name: String,
        operation: Operation,
    },
    ConfirmDelete {
        action_id: String,
    },
    ClusterDetail(Box<ClusterDetail>),
    InstanceDetail(Box<Instance>),
    Logs,
    Help,
}
