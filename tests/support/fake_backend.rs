//! In-memory inventory backend for service and task manager tests.

#![allow(dead_code)]

use async_trait::async_trait;
use nimbus::backend::{BackendError, InventoryBackend, PowerRequest};
use nimbus::models::{Account, Action, Cluster, Instance, NewAction, Overview, Page, SystemEvent, Tag};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

fn page_of<T: Clone>(items: &[T], page: u32, page_size: usize) -> Page<T> {
    let start = (page as usize - 1) * page_size;
    let slice = items.iter().skip(start).take(page_size).cloned().collect();
    Page::new(items.len(), slice)
}

#[derive(Default)]
pub struct FakeBackend {
    pub accounts: Vec<Account>,
    pub clusters: Vec<Cluster>,
    pub instances: Vec<Instance>,
    pub events: Vec<SystemEvent>,
    pub tags: Vec<Tag>,
    pub actions: Mutex<Vec<Action>>,
    pub observed: Option<String>,
    pub fail_writes: bool,
    pub fail_action_list: AtomicBool,
    pub calls: Mutex<Vec<String>>,
    pub power_requests: Mutex<Vec<(String, PowerRequest)>>,
    pub created: Mutex<Vec<NewAction>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn write(&self) -> Result<(), BackendError> {
        if self.fail_writes {
            Err(BackendError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn set_enabled(&self, action_id: &str, enabled: bool) -> Result<(), BackendError> {
        self.write()?;
        let mut actions = self.actions.lock().unwrap();
        let action = actions
            .iter_mut()
            .find(|a| a.id == action_id)
            .ok_or_else(|| BackendError::NotFound(action_id.to_string()))?;
        action.enabled = enabled;
        Ok(())
    }
}

#[async_trait]
impl InventoryBackend for FakeBackend {
    fn backend_type(&self) -> &str {
        "fake"
    }

    fn observed_user(&self) -> Option<String> {
        self.observed.clone()
    }

    async fn list_accounts(&self, page: u32, page_size: usize) -> Result<Page<Account>, BackendError> {
        self.record(format!("accounts:{page}"));
        Ok(page_of(&self.accounts, page, page_size))
    }

    async fn list_account_clusters(
        &self,
        account_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<Cluster>, BackendError> {
        self.record(format!("account_clusters:{account_id}:{page}"));
        let clusters: Vec<Cluster> = self
            .clusters
            .iter()
            .filter(|c| c.account_id == account_id)
            .cloned()
            .collect();
        Ok(page_of(&clusters, page, page_size))
    }

    async fn list_clusters(&self, page: u32, page_size: usize) -> Result<Page<Cluster>, BackendError> {
        self.record(format!("clusters:{page}"));
        Ok(page_of(&self.clusters, page, page_size))
    }

    async fn get_cluster(&self, cluster_id: &str) -> Result<Cluster, BackendError> {
        self.record(format!("cluster:{cluster_id}"));
        self.clusters
            .iter()
            .find(|c| c.id == cluster_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(cluster_id.to_string()))
    }

    async fn list_cluster_instances(
        &self,
        cluster_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<Instance>, BackendError> {
        self.record(format!("cluster_instances:{cluster_id}:{page}"));
        let instances: Vec<Instance> = self
            .instances
            .iter()
            .filter(|i| i.cluster_id == cluster_id)
            .cloned()
            .collect();
        Ok(page_of(&instances, page, page_size))
    }

    async fn list_cluster_tags(&self, cluster_id: &str) -> Result<Vec<Tag>, BackendError> {
        self.record(format!("cluster_tags:{cluster_id}"));
        Ok(self.tags.clone())
    }

    async fn list_cluster_events(
        &self,
        cluster_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<SystemEvent>, BackendError> {
        self.record(format!("cluster_events:{cluster_id}:{page}"));
        Ok(page_of(&self.events, page, page_size))
    }

    async fn power_on(&self, cluster_id: &str, request: &PowerRequest) -> Result<(), BackendError> {
        self.record(format!("power_on:{cluster_id}"));
        self.write()?;
        self.power_requests
            .lock()
            .unwrap()
            .push((cluster_id.to_string(), request.clone()));
        Ok(())
    }

    async fn power_off(&self, cluster_id: &str, request: &PowerRequest) -> Result<(), BackendError> {
        self.record(format!("power_off:{cluster_id}"));
        self.write()?;
        self.power_requests
            .lock()
            .unwrap()
            .push((cluster_id.to_string(), request.clone()));
        Ok(())
    }

    async fn list_instances(&self, page: u32, page_size: usize) -> Result<Page<Instance>, BackendError> {
        self.record(format!("instances:{page}"));
        Ok(page_of(&self.instances, page, page_size))
    }

    async fn get_instance(&self, instance_id: &str) -> Result<Instance, BackendError> {
        self.record(format!("instance:{instance_id}"));
        self.instances
            .iter()
            .find(|i| i.id == instance_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(instance_id.to_string()))
    }

    async fn list_events(&self, page: u32, page_size: usize) -> Result<Page<SystemEvent>, BackendError> {
        self.record(format!("events:{page}"));
        Ok(page_of(&self.events, page, page_size))
    }

    async fn list_actions(&self, page: u32, page_size: usize) -> Result<Page<Action>, BackendError> {
        self.record(format!("actions:{page}"));
        if self.fail_action_list.load(Ordering::SeqCst) {
            return Err(BackendError::Network("connection reset".to_string()));
        }
        let actions = self.actions.lock().unwrap().clone();
        Ok(page_of(&actions, page, page_size))
    }

    async fn create_actions(&self, actions: &[NewAction]) -> Result<(), BackendError> {
        self.record(format!("create_actions:{}", actions.len()));
        self.write()?;
        self.created.lock().unwrap().extend_from_slice(actions);
        Ok(())
    }

    async fn enable_action(&self, action_id: &str) -> Result<(), BackendError> {
        self.record(format!("enable:{action_id}"));
        self.set_enabled(action_id, true)
    }

    async fn disable_action(&self, action_id: &str) -> Result<(), BackendError> {
        self.record(format!("disable:{action_id}"));
        self.set_enabled(action_id, false)
    }

    async fn delete_action(&self, action_id: &str) -> Result<(), BackendError> {
        self.record(format!("delete:{action_id}"));
        self.write()?;
        self.actions.lock().unwrap().retain(|a| a.id != action_id);
        Ok(())
    }

    async fn overview(&self) -> Result<Overview, BackendError> {
        self.record("overview");
        Ok(Overview {
            account_count: self.accounts.len() as u32,
            cluster_count: self.clusters.len() as u32,
            ..Default::default()
        })
    }
}

pub fn account(id: &str, name: &str) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn cluster(id: &str, account_id: &str) -> Cluster {
    Cluster {
        id: id.to_string(),
        name: format!("cluster-{id}"),
        account_id: account_id.to_string(),
        region: "eu-west-1".to_string(),
        ..Default::default()
    }
}

pub fn cron_action(id: &str, cluster_id: &str) -> Action {
    Action {
        id: id.to_string(),
        account_id: "acc-1".to_string(),
        cluster_id: cluster_id.to_string(),
        operation: nimbus::models::Operation::PowerOff,
        status: nimbus::models::ActionStatus::Pending,
        enabled: true,
        region: "eu-west-1".to_string(),
        trigger: nimbus::models::ActionTrigger::Cron {
            cron_expression: "0 20 * * 1-5".to_string(),
        },
    }
}
