//! State machine behind the power action dialog.
//!
//! The form is driven by [`FormMsg`]s through [`ScheduleForm::update`], which
//! returns the side effect the caller must perform (load data, call the API,
//! reload the action list). The form itself does no I/O.
//!
//! Invariants:
//! - the selected cluster is `None` or one of the clusters loaded for the
//!   selected account;
//! - changing the account clears the cluster selection and the cluster list
//!   before the new list is requested;
//! - results of loads and submissions started before the latest one (or
//!   before the dialog was closed) are discarded;
//! - closing, for any reason, resets every field.

use log::{debug, error, info};

use super::{ActionDraft, ExecutionDraft, ExecutionMode, ScheduleError, Submission};
use crate::constants::{ERROR_ACTION_CREATE_FAILED, SUCCESS_ACTION_CREATED};
use crate::models::{Account, Cluster, NewAction, Operation};
use crate::utils::epoch::FetchEpoch;

/// Where the operator is in the flow. Derived from the form contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStep {
    SelectingTarget,
    SelectingOperation,
    SelectingExecutionMode,
    Immediate,
    Scheduled,
    Cron,
    Submitting,
    Closed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormMsg {
    Open,
    AccountsLoaded { epoch: u64, accounts: Vec<Account> },
    AccountsFailed { epoch: u64, message: String },
    SelectAccount(String),
    ClustersLoaded { epoch: u64, clusters: Vec<Cluster> },
    ClustersFailed { epoch: u64, message: String },
    SelectCluster(String),
    SelectOperation(Operation),
    SelectMode(ExecutionMode),
    SetDate(String),
    SetTime(String),
    SetTimezone(String),
    SetCronExpression(String),
    Submit,
    SubmitSucceeded { epoch: u64 },
    SubmitFailed { epoch: u64, message: String },
    Cancel,
}

/// Work the caller must do after an update.
#[derive(Clone, Debug, PartialEq)]
pub enum FormEffect {
    None,
    LoadAccounts { epoch: u64 },
    LoadClusters { account_id: String, epoch: u64 },
    /// Dispatch without waiting; the form has already closed.
    Fire(Submission),
    /// Dispatch and report back with `SubmitSucceeded` or `SubmitFailed`, tagged with `epoch`.
    Submit { submission: Submission, epoch: u64 },
    /// A submission went through: reload the action list.
    Reload,
}

#[derive(Debug, Default)]
pub struct ScheduleForm {
    open: bool,
    submitting: bool,
    accounts: Vec<Account>,
    accounts_loading: bool,
    clusters: Vec<Cluster>,
    clusters_loading: bool,
    account_id: Option<String>,
    cluster_id: Option<String>,
    operation: Option<Operation>,
    execution: Option<ExecutionDraft>,
    accounts_epoch: FetchEpoch,
    clusters_epoch: FetchEpoch,
    submit_epoch: FetchEpoch,
}

impl ScheduleForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn accounts_loading(&self) -> bool {
        self.accounts_loading
    }

    pub fn clusters_loading(&self) -> bool {
        self.clusters_loading
    }

    pub fn selected_account(&self) -> Option<&Account> {
        let id = self.account_id.as_deref()?;
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn selected_account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn selected_cluster(&self) -> Option<&Cluster> {
        let id = self.cluster_id.as_deref()?;
        self.clusters.iter().find(|c| c.id == id)
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn execution(&self) -> Option<&ExecutionDraft> {
        self.execution.as_ref()
    }

    pub fn step(&self) -> FormStep {
        if !self.open {
            return FormStep::Closed;
        }
        if self.submitting {
            return FormStep::Submitting;
        }
        if self.account_id.is_none() || self.selected_cluster().is_none() {
            return FormStep::SelectingTarget;
        }
        if self.operation.is_none() {
            return FormStep::SelectingOperation;
        }
        match self.execution.as_ref().map(ExecutionDraft::mode) {
            None => FormStep::SelectingExecutionMode,
            Some(ExecutionMode::Immediate) => FormStep::Immediate,
            Some(ExecutionMode::Scheduled) => FormStep::Scheduled,
            Some(ExecutionMode::Cron) => FormStep::Cron,
        }
    }

    /// Everything needed to submit, or the first thing missing.
    pub fn validate(&self) -> Result<(Account, Cluster, Operation, ActionDraft), ScheduleError> {
        let account = self.selected_account().ok_or(ScheduleError::MissingAccount)?;
        let cluster = self.selected_cluster().ok_or(ScheduleError::MissingCluster)?;
        let operation = self.operation.ok_or(ScheduleError::MissingOperation)?;
        let draft = self.execution.as_ref().ok_or(ScheduleError::MissingMode)?.resolve()?;
        Ok((account.clone(), cluster.clone(), operation, draft))
    }

    /// Whether the confirm button is enabled. Recomputed from the fields every time.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn update(&mut self, msg: FormMsg) -> FormEffect {
        match msg {
            FormMsg::Open => {
                self.reset();
                self.open = true;
                self.accounts_loading = true;
                FormEffect::LoadAccounts {
                    epoch: self.accounts_epoch.begin(),
                }
            }
            FormMsg::Cancel => {
                self.reset();
                FormEffect::None
            }
            FormMsg::SubmitSucceeded { epoch } => {
                info!("{}", SUCCESS_ACTION_CREATED);
                if self.submitting && self.submit_epoch.is_current(epoch) {
                    self.reset();
                } else {
                    debug!("⏭️  Submission {} finished after the dialog moved on", epoch);
                }
                // The action exists either way
                FormEffect::Reload
            }
            FormMsg::SubmitFailed { epoch, message } => {
                // No banner: the dialog stays as it was so the operator can retry.
                error!("{}: {}", ERROR_ACTION_CREATE_FAILED, message);
                if self.submit_epoch.is_current(epoch) {
                    self.submitting = false;
                }
                FormEffect::None
            }
            _ if !self.open || self.submitting => FormEffect::None,
            FormMsg::AccountsLoaded { epoch, accounts } => {
                if self.accounts_epoch.is_current(epoch) {
                    self.accounts = accounts;
                    self.accounts_loading = false;
                } else {
                    debug!("⏭️  Dropping superseded account list (epoch {})", epoch);
                }
                FormEffect::None
            }
            FormMsg::AccountsFailed { epoch, message } => {
                if self.accounts_epoch.is_current(epoch) {
                    error!("❌ Failed to load accounts: {}", message);
                    self.accounts_loading = false;
                }
                FormEffect::None
            }
            FormMsg::SelectAccount(account_id) => {
                if self.account_id.as_deref() == Some(account_id.as_str())
                    || !self.accounts.iter().any(|a| a.id == account_id)
                {
                    return FormEffect::None;
                }
                self.account_id = Some(account_id.clone());
                self.cluster_id = None;
                self.clusters.clear();
                self.clusters_loading = true;
                FormEffect::LoadClusters {
                    account_id,
                    epoch: self.clusters_epoch.begin(),
                }
            }
            FormMsg::ClustersLoaded { epoch, clusters } => {
                if self.clusters_epoch.is_current(epoch) {
                    self.clusters = clusters;
                    self.clusters_loading = false;
                } else {
                    debug!("⏭️  Dropping superseded cluster list (epoch {})", epoch);
                }
                FormEffect::None
            }
            FormMsg::ClustersFailed { epoch, message } => {
                if self.clusters_epoch.is_current(epoch) {
                    error!("❌ Failed to load clusters: {}", message);
                    self.clusters_loading = false;
                }
                FormEffect::None
            }
            FormMsg::SelectCluster(cluster_id) => {
                if self.clusters.iter().any(|c| c.id == cluster_id) {
                    self.cluster_id = Some(cluster_id);
                }
                FormEffect::None
            }
            FormMsg::SelectOperation(operation) => {
                self.operation = Some(operation);
                FormEffect::None
            }
            FormMsg::SelectMode(mode) => {
                if self.execution.as_ref().map(ExecutionDraft::mode) != Some(mode) {
                    self.execution = Some(ExecutionDraft::for_mode(mode));
                }
                FormEffect::None
            }
            FormMsg::SetDate(value) => {
                if let Some(ExecutionDraft::Scheduled { date, .. }) = &mut self.execution {
                    *date = value;
                }
                FormEffect::None
            }
            FormMsg::SetTime(value) => {
                if let Some(ExecutionDraft::Scheduled { time, .. }) = &mut self.execution {
                    *time = value;
                }
                FormEffect::None
            }
            FormMsg::SetTimezone(value) => {
                if let Some(ExecutionDraft::Scheduled { timezone, .. }) = &mut self.execution {
                    *timezone = value;
                }
                FormEffect::None
            }
            FormMsg::SetCronExpression(value) => {
                if let Some(ExecutionDraft::Cron { expression }) = &mut self.execution {
                    *expression = value;
                }
                FormEffect::None
            }
            FormMsg::Submit => self.submit(),
        }
    }

    fn submit(&mut self) -> FormEffect {
        let (account, cluster, operation, draft) = match self.validate() {
            Ok(parts) => parts,
            Err(e) => {
                debug!("Submit ignored: {}", e);
                return FormEffect::None;
            }
        };

        match draft.trigger() {
            None => {
                let submission = Submission::PowerNow {
                    cluster_id: cluster.id,
                    operation,
                };
                // Immediate actions close without waiting for the power call.
                self.reset();
                FormEffect::Fire(submission)
            }
            Some(trigger) => {
                self.submitting = true;
                FormEffect::Submit {
                    submission: Submission::Create(NewAction::new(
                        account.id,
                        cluster.id,
                        cluster.region,
                        operation,
                        trigger,
                    )),
                    epoch: self.submit_epoch.begin(),
                }
            }
        }
    }

    /// Back to the initial closed state. In-flight loads become stale.
    fn reset(&mut self) {
        self.open = false;
        self.submitting = false;
        self.accounts.clear();
        self.accounts_loading = false;
        self.clusters.clear();
        self.clusters_loading = false;
        self.account_id = None;
        self.cluster_id = None;
        self.operation = None;
        self.execution = None;
        self.accounts_epoch.invalidate();
        self.clusters_epoch.invalidate();
        self.submit_epoch.invalidate();
    }
}
