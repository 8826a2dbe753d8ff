//! Inventory API abstraction.
//!
//! This module defines the interface the rest of the application uses to reach
//! the inventory server: one async method per REST operation, returning typed
//! models. [`http::HttpBackend`] implements it over HTTP; tests implement it in
//! memory.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Account, Action, Cluster, Instance, NewAction, Overview, Page, SystemEvent, Tag};

pub mod http;

pub use http::HttpBackend;

/// Common error types for backend operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Backend error: {0}")]
    Other(String),
}

/// Body of `POST /clusters/{id}/power_on` and `/power_off`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PowerRequest {
    pub triggered_by: String,
    pub description: String,
}

/// Backend trait for the inventory REST API.
///
/// List methods map to paginated endpoints and return a single [`Page`];
/// use [`crate::pagination::fetch_all_pages`] to get a whole collection.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    /// Returns the backend type identifier (e.g., "http").
    fn backend_type(&self) -> &str;

    /// Identity of the operator as reported by the server, once seen.
    fn observed_user(&self) -> Option<String> {
        None
    }

    // Accounts
    async fn list_accounts(&self, page: u32, page_size: usize) -> Result<Page<Account>, BackendError>;
    async fn list_account_clusters(
        &self,
        account_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<Cluster>, BackendError>;

    // Clusters
    async fn list_clusters(&self, page: u32, page_size: usize) -> Result<Page<Cluster>, BackendError>;
    async fn get_cluster(&self, cluster_id: &str) -> Result<Cluster, BackendError>;
    async fn list_cluster_instances(
        &self,
        cluster_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<Instance>, BackendError>;
    async fn list_cluster_tags(&self, cluster_id: &str) -> Result<Vec<Tag>, BackendError>;
    async fn list_cluster_events(
        &self,
        cluster_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<SystemEvent>, BackendError>;
    async fn power_on(&self, cluster_id: &str, request: &PowerRequest) -> Result<(), BackendError>;
    async fn power_off(&self, cluster_id: &str, request: &PowerRequest) -> Result<(), BackendError>;

    // Instances
    async fn list_instances(&self, page: u32, page_size: usize) -> Result<Page<Instance>, BackendError>;
    async fn get_instance(&self, instance_id: &str) -> Result<Instance, BackendError>;

    // Audit log
    async fn list_events(&self, page: u32, page_size: usize) -> Result<Page<SystemEvent>, BackendError>;

    // Scheduled actions
    async fn list_actions(&self, page: u32, page_size: usize) -> Result<Page<Action>, BackendError>;
    async fn create_actions(&self, actions: &[NewAction]) -> Result<(), BackendError>;
    async fn enable_action(&self, action_id: &str) -> Result<(), BackendError>;
    async fn disable_action(&self, action_id: &str) -> Result<(), BackendError>;
    async fn delete_action(&self, action_id: &str) -> Result<(), BackendError>;

    async fn overview(&self) -> Result<Overview, BackendError>;
}
