use super::actions::{Action, View};
use crate::constants::{
    ERROR_ACTION_UPDATE_FAILED, ERROR_POWER_FAILED, SUCCESS_ACTION_DELETED, SUCCESS_ACTION_DISABLED,
    SUCCESS_ACTION_ENABLED, SUCCESS_POWER_OFF_REQUESTED, SUCCESS_POWER_ON_REQUESTED,
};
use crate::models::Operation;
use crate::schedule::{FormEffect, FormMsg, Submission};
use crate::service::actions::{RowAction, RowActionError};
use crate::service::InventoryService;
use log::{debug, warn};
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

/// Tasks running longer than this are reported when cleaned up.
const LONG_RUNNING: std::time::Duration = std::time::Duration::from_secs(30);

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

impl BackgroundTask {
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}

/// Runs network work on tokio tasks. Results come back to the event loop as
/// [`Action`]s on the receiver returned by [`TaskManager::new`].
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Sender for work that completes outside the task manager (the search debouncer).
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_sender.clone()
    }

    /// Spawn `work` and forward the action it resolves to.
    fn spawn<Fut>(&mut self, description: String, work: Fut) -> TaskId
    where
        Fut: Future<Output = Action> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let action_sender = self.action_sender.clone();
        debug!("Task {} started: {}", task_id, description);

        let handle = tokio::spawn(async move {
            let action = work.await;
            if !matches!(action, Action::None) {
                let _ = action_sender.send(action);
            }
        });

        self.tasks.insert(
            task_id,
            BackgroundTask {
                id: task_id,
                handle,
                description,
                started_at: std::time::Instant::now(),
            },
        );
        task_id
    }

    /// Load the full collection behind `view`, tagged with `epoch`.
    pub fn spawn_view_load(&mut self, service: InventoryService, view: View, epoch: u64) -> TaskId {
        let description = format!("Loading {}", view.name());

        self.spawn(description, async move {
            let result = match view {
                View::Accounts => service
                    .accounts()
                    .await
                    .map(|accounts| Action::AccountsLoaded { epoch, accounts }),
                View::Clusters => service
                    .clusters(None)
                    .await
                    .map(|clusters| Action::ClustersLoaded { epoch, clusters }),
                View::Instances => service
                    .instances(None)
                    .await
                    .map(|instances| Action::InstancesLoaded { epoch, instances }),
                View::Schedules => service
                    .actions()
                    .await
                    .map(|actions| Action::ActionsLoaded { epoch, actions }),
                View::Events => service
                    .events(None)
                    .await
                    .map(|events| Action::EventsLoaded { epoch, events }),
            };
            result.unwrap_or_else(|e| Action::LoadFailed {
                view,
                epoch,
                message: e.to_string(),
            })
        })
    }

    pub fn spawn_overview_load(&mut self, service: InventoryService) -> TaskId {
        self.spawn("Loading overview".to_string(), async move {
            match service.overview().await {
                Ok(overview) => Action::OverviewLoaded(overview),
                Err(e) => {
                    // The overview is decoration; the tables carry on without it.
                    warn!("Overview unavailable: {}", e);
                    Action::None
                }
            }
        })
    }

    pub fn spawn_cluster_detail(&mut self, service: InventoryService, cluster_id: String) -> TaskId {
        let description = format!("Loading cluster {}", cluster_id);

        self.spawn(description, async move {
            match service.cluster_detail(&cluster_id).await {
                Ok(detail) => Action::ClusterDetailLoaded(Box::new(detail)),
                Err(e) => Action::ShowError(format!("Failed to load cluster {}: {}", cluster_id, e)),
            }
        })
    }

    pub fn spawn_instance_detail(&mut self, service: InventoryService, instance_id: String) -> TaskId {
        let description = format!("Loading instance {}", instance_id);

        self.spawn(description, async move {
            match service.instance(&instance_id).await {
                Ok(instance) => Action::InstanceDetailLoaded(Box::new(instance)),
                Err(e) => Action::ShowError(format!("Failed to load instance {}: {}", instance_id, e)),
            }
        })
    }

    /// Power a cluster on or off right away.
    pub fn spawn_power(&mut self, service: InventoryService, cluster_id: String, operation: Operation) -> TaskId {
        let description = format!("{} cluster {}", operation.label(), cluster_id);

        self.spawn(description, async move {
            match service.power(&cluster_id, operation).await {
                Ok(()) => Action::ShowInfo(
                    match operation {
                        Operation::PowerOn => SUCCESS_POWER_ON_REQUESTED,
                        Operation::PowerOff => SUCCESS_POWER_OFF_REQUESTED,
                    }
                    .to_string(),
                ),
                Err(e) => Action::ShowError(format!("{} ({}): {}", ERROR_POWER_FAILED, operation.label(), e)),
            }
        })
    }

    /// Enable, disable or delete an action; the reloaded list comes back tagged with `epoch`.
    ///
    /// Every outcome carries `epoch` so the view can leave its loading state.
    pub fn spawn_row_action(
        &mut self,
        service: InventoryService,
        action_id: String,
        row_action: RowAction,
        epoch: u64,
    ) -> TaskId {
        let description = format!("{} action {}", row_action.label(), action_id);
        let info_sender = self.action_sender.clone();

        self.spawn(description, async move {
            let success = match row_action {
                RowAction::Enable => SUCCESS_ACTION_ENABLED,
                RowAction::Disable => SUCCESS_ACTION_DISABLED,
                RowAction::Delete => SUCCESS_ACTION_DELETED,
            };
            match service.apply_row_action(&action_id, row_action).await {
                Ok(actions) => {
                    let _ = info_sender.send(Action::ShowInfo(success.to_string()));
                    Action::ActionsLoaded { epoch, actions }
                }
                Err(RowActionError::Write(e)) => Action::RowActionFailed {
                    epoch,
                    message: format!("{} ({} {}): {}", ERROR_ACTION_UPDATE_FAILED, row_action.label(), action_id, e),
                },
                Err(RowActionError::Reload(e)) => {
                    let _ = info_sender.send(Action::ShowInfo(success.to_string()));
                    Action::LoadFailed {
                        view: View::Schedules,
                        epoch,
                        message: e.to_string(),
                    }
                }
            }
        })
    }

    /// Carry out a side effect requested by the power action dialog.
    ///
    /// `FormEffect::Reload` is not handled here: reloading a list needs the
    /// view's epoch, which only the app state owns.
    pub fn spawn_form_effect(&mut self, service: InventoryService, effect: FormEffect) -> Option<TaskId> {
        let task_id = match effect {
            FormEffect::None | FormEffect::Reload => return None,
            FormEffect::LoadAccounts { epoch } => self.spawn("Loading accounts for dialog".to_string(), async move {
                let msg = match service.accounts().await {
                    Ok(accounts) => FormMsg::AccountsLoaded { epoch, accounts },
                    Err(e) => FormMsg::AccountsFailed {
                        epoch,
                        message: e.to_string(),
                    },
                };
                Action::Schedule(msg)
            }),
            FormEffect::LoadClusters { account_id, epoch } => {
                let description = format!("Loading clusters of account {}", account_id);
                self.spawn(description, async move {
                    let msg = match service.clusters(Some(&account_id)).await {
                        Ok(clusters) => FormMsg::ClustersLoaded { epoch, clusters },
                        Err(e) => FormMsg::ClustersFailed {
                            epoch,
                            message: e.to_string(),
                        },
                    };
                    Action::Schedule(msg)
                })
            }
            FormEffect::Fire(submission) => {
                // The dialog has already closed; the outcome is only logged.
                let description = submission.describe();
                self.spawn(description, async move {
                    let _ = service.submit(&submission).await;
                    Action::None
                })
            }
            FormEffect::Submit { submission, epoch } => {
                let description = submission.describe();
                self.spawn(description, async move {
                    let msg = match service.submit(&submission).await {
                        Ok(()) => FormMsg::SubmitSucceeded { epoch },
                        Err(e) => FormMsg::SubmitFailed {
                            epoch,
                            message: e.to_string(),
                        },
                    };
                    Action::Schedule(msg)
                })
            }
        };
        Some(task_id)
    }

    /// Drop finished tasks, returning their ids
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        for task_id in &finished {
            if let Some(task) = self.tasks.remove(task_id) {
                if task.elapsed() > LONG_RUNNING {
                    warn!("Slow task {} took {:?}: {}", task.id, task.elapsed(), task.description);
                }
            }
        }

        finished
    }

    /// Whether anything is still in flight
    pub fn is_busy(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
