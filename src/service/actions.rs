use log::{error, info};
use std::sync::Arc;

use crate::backend::{BackendError, PowerRequest};
use crate::models::{Action, NewAction, Operation};
use crate::pagination::fetch_all_pages;
use crate::schedule::Submission;
use crate::service::InventoryService;

/// Row-level operations on an existing scheduled action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Enable,
    Disable,
    Delete,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Enable => "Enable",
            RowAction::Disable => "Disable",
            RowAction::Delete => "Delete",
        }
    }
}

/// Which half of a row operation failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowActionError {
    /// The server rejected the change; nothing was modified.
    #[error("{0}")]
    Write(BackendError),

    /// The change was applied but the action list could not be fetched again.
    #[error("applied, but reloading actions failed: {0}")]
    Reload(BackendError),
}

impl InventoryService {
    /// All scheduled and cron actions.
    pub async fn actions(&self) -> Result<Vec<Action>, BackendError> {
        let backend = self.backend();
        let actions = fetch_all_pages(
            |page, size| {
                let backend = Arc::clone(&backend);
                async move { backend.list_actions(page, size).await }
            },
            self.page_size(),
        )
        .await?;
        info!("✅ Fetched {} scheduled actions from API", actions.len());
        Ok(actions)
    }

    /// Ask the server to power a cluster on or off now.
    ///
    /// The cluster status is not touched locally; the change shows up on the
    /// next reload.
    pub async fn power(&self, cluster_id: &str, operation: Operation) -> Result<(), BackendError> {
        let request = PowerRequest {
            triggered_by: self.triggered_by(),
            description: format!("{} requested from nimbus", operation.label()),
        };
        info!("⚡ {} cluster {} (by {})", operation.label(), cluster_id, request.triggered_by);

        let backend = self.backend();
        let result = match operation {
            Operation::PowerOn => backend.power_on(cluster_id, &request).await,
            Operation::PowerOff => backend.power_off(cluster_id, &request).await,
        };
        if let Err(e) = &result {
            error!("❌ {} cluster {} failed: {}", operation.label(), cluster_id, e);
        }
        result
    }

    /// Persist scheduled or cron actions. The endpoint takes a batch.
    pub async fn create_actions(&self, actions: &[NewAction]) -> Result<(), BackendError> {
        self.backend().create_actions(actions).await?;
        info!("✅ Created {} scheduled action(s)", actions.len());
        Ok(())
    }

    /// Carry out what the power action dialog produced.
    pub async fn submit(&self, submission: &Submission) -> Result<(), BackendError> {
        match submission {
            Submission::PowerNow { cluster_id, operation } => self.power(cluster_id, *operation).await,
            Submission::Create(action) => self.create_actions(std::slice::from_ref(action)).await,
        }
    }

    /// Apply a row operation, then reload the full action list from the server.
    pub async fn apply_row_action(&self, action_id: &str, row_action: RowAction) -> Result<Vec<Action>, RowActionError> {
        let backend = self.backend();
        let written = match row_action {
            RowAction::Enable => backend.enable_action(action_id).await,
            RowAction::Disable => backend.disable_action(action_id).await,
            RowAction::Delete => backend.delete_action(action_id).await,
        };
        if let Err(e) = written {
            error!("❌ {} action {} failed: {}", row_action.label(), action_id, e);
            return Err(RowActionError::Write(e));
        }
        info!("✅ {} action {}", row_action.label(), action_id);
        self.actions().await.map_err(RowActionError::Reload)
    }

    pub async fn enable_action(&self, action_id: &str) -> Result<Vec<Action>, RowActionError> {
        self.apply_row_action(action_id, RowAction::Enable).await
    }

    pub async fn disable_action(&self, action_id: &str) -> Result<Vec<Action>, RowActionError> {
        self.apply_row_action(action_id, RowAction::Disable).await
    }

    pub async fn delete_action(&self, action_id: &str) -> Result<Vec<Action>, RowActionError> {
        self.apply_row_action(action_id, RowAction::Delete).await
    }
}
