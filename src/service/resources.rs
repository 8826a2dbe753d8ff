use log::info;
use std::sync::Arc;

use crate::backend::BackendError;
use crate::models::{Account, Cluster, Instance, Overview, SystemEvent, Tag};
use crate::pagination::fetch_all_pages;
use crate::service::InventoryService;

/// Everything shown on a cluster's detail panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterDetail {
    pub cluster: Cluster,
    pub instances: Vec<Instance>,
    pub tags: Vec<Tag>,
    pub events: Vec<SystemEvent>,
}

impl InventoryService {
    /// All accounts, across every API page.
    pub async fn accounts(&self) -> Result<Vec<Account>, BackendError> {
        let backend = self.backend();
        let accounts = fetch_all_pages(
            |page, size| {
                let backend = Arc::clone(&backend);
                async move { backend.list_accounts(page, size).await }
            },
            self.page_size(),
        )
        .await?;
        info!("✅ Fetched {} accounts from API", accounts.len());
        Ok(accounts)
    }

    /// All clusters, or only those of `account_id`.
    pub async fn clusters(&self, account_id: Option<&str>) -> Result<Vec<Cluster>, BackendError> {
        let backend = self.backend();
        let clusters = match account_id {
            Some(account_id) => {
                let account_id = account_id.to_string();
                fetch_all_pages(
                    |page, size| {
                        let backend = Arc::clone(&backend);
                        let account_id = account_id.clone();
                        async move { backend.list_account_clusters(&account_id, page, size).await }
                    },
                    self.page_size(),
                )
                .await?
            }
            None => {
                fetch_all_pages(
                    |page, size| {
                        let backend = Arc::clone(&backend);
                        async move { backend.list_clusters(page, size).await }
                    },
                    self.page_size(),
                )
                .await?
            }
        };
        info!("✅ Fetched {} clusters from API", clusters.len());
        Ok(clusters)
    }

    /// All instances, or only those of `cluster_id`.
    pub async fn instances(&self, cluster_id: Option<&str>) -> Result<Vec<Instance>, BackendError> {
        let backend = self.backend();
        let instances = match cluster_id {
            Some(cluster_id) => {
                let cluster_id = cluster_id.to_string();
                fetch_all_pages(
                    |page, size| {
                        let backend = Arc::clone(&backend);
                        let cluster_id = cluster_id.clone();
                        async move { backend.list_cluster_instances(&cluster_id, page, size).await }
                    },
                    self.page_size(),
                )
                .await?
            }
            None => {
                fetch_all_pages(
                    |page, size| {
                        let backend = Arc::clone(&backend);
                        async move { backend.list_instances(page, size).await }
                    },
                    self.page_size(),
                )
                .await?
            }
        };
        info!("✅ Fetched {} instances from API", instances.len());
        Ok(instances)
    }

    /// The audit log, or only the entries of `cluster_id`.
    pub async fn events(&self, cluster_id: Option<&str>) -> Result<Vec<SystemEvent>, BackendError> {
        let backend = self.backend();
        let events = match cluster_id {
            Some(cluster_id) => {
                let cluster_id = cluster_id.to_string();
                fetch_all_pages(
                    |page, size| {
                        let backend = Arc::clone(&backend);
                        let cluster_id = cluster_id.clone();
                        async move { backend.list_cluster_events(&cluster_id, page, size).await }
                    },
                    self.page_size(),
                )
                .await?
            }
            None => {
                fetch_all_pages(
                    |page, size| {
                        let backend = Arc::clone(&backend);
                        async move { backend.list_events(page, size).await }
                    },
                    self.page_size(),
                )
                .await?
            }
        };
        info!("✅ Fetched {} events from API", events.len());
        Ok(events)
    }

    pub async fn cluster(&self, cluster_id: &str) -> Result<Cluster, BackendError> {
        self.backend().get_cluster(cluster_id).await
    }

    pub async fn instance(&self, instance_id: &str) -> Result<Instance, BackendError> {
        self.backend().get_instance(instance_id).await
    }

    pub async fn cluster_tags(&self, cluster_id: &str) -> Result<Vec<Tag>, BackendError> {
        self.backend().list_cluster_tags(cluster_id).await
    }

    /// Cluster with its instances, tags and events, fetched one after another.
    pub async fn cluster_detail(&self, cluster_id: &str) -> Result<ClusterDetail, BackendError> {
        let cluster = self.cluster(cluster_id).await?;
        let instances = self.instances(Some(cluster_id)).await?;
        let tags = self.cluster_tags(cluster_id).await?;
        let events = self.events(Some(cluster_id)).await?;
        Ok(ClusterDetail {
            cluster,
            instances,
            tags,
            events,
        })
    }

    pub async fn overview(&self) -> Result<Overview, BackendError> {
        self.backend().overview().await
    }
}
