//! HTTP implementation of the inventory backend.

use async_trait::async_trait;
use log::{debug, warn};
use once_cell::sync::OnceCell;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{BackendError, InventoryBackend, PowerRequest};
use crate::config::ApiConfig;
use crate::models::{Account, Action, Cluster, Instance, NewAction, Overview, Page, SystemEvent, Tag};

/// Inventory backend talking to the REST API with `reqwest`.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    user_header: String,
    observed_user: OnceCell<String>,
}

impl HttpBackend {
    /// Create a backend for `base_url`, reading the operator identity from `user_header`.
    pub fn new(base_url: impl Into<String>, user_header: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_header: user_header.into(),
            observed_user: OnceCell::new(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, BackendError> {
        Self::new(
            config.base_url.clone(),
            config.user_header.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn observe_user(&self, response: &Response) {
        if self.observed_user.get().is_some() {
            return;
        }
        let user = response
            .headers()
            .get(self.user_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(user) = user {
            let _ = self.observed_user.set(user.to_string());
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(|e| BackendError::Network(e.to_string()))?;
        self.observe_user(&response);

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("{} failed with HTTP {}", what, status.as_u16());
            return Err(BackendError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, BackendError> {
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidData(format!("{what}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let what = format!("GET {path}");
        debug!("{}", what);
        let response = self.send(self.client.get(self.url(path)), &what).await?;
        Self::decode(response, &what).await
    }

    async fn get_page<T: DeserializeOwned>(&self, path: &str, page: u32, page_size: usize) -> Result<Page<T>, BackendError> {
        let what = format!("GET {path} page {page}");
        debug!("{}", what);
        let request = self
            .client
            .get(self.url(path))
            .query(&[("page", page.to_string()), ("page_size", page_size.to_string())]);
        let response = self.send(request, &what).await?;
        Self::decode(response, &what).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), BackendError> {
        let what = format!("POST {path}");
        debug!("{}", what);
        self.send(self.client.post(self.url(path)), &what).await?;
        Ok(())
    }

    async fn post_json<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), BackendError> {
        let what = format!("POST {path}");
        debug!("{}", what);
        self.send(self.client.post(self.url(path)).json(body), &what).await?;
        Ok(())
    }
}

#[async_trait]
impl InventoryBackend for HttpBackend {
    fn backend_type(&self) -> &str {
        "http"
    }

    fn observed_user(&self) -> Option<String> {
        self.observed_user.get().cloned()
    }

    async fn list_accounts(&self, page: u32, page_size: usize) -> Result<Page<Account>, BackendError> {
        self.get_page("/accounts", page, page_size).await
    }

    async fn list_account_clusters(
        &self,
        account_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<Cluster>, BackendError> {
        self.get_page(&format!("/accounts/{account_id}/clusters"), page, page_size).await
    }

    async fn list_clusters(&self, page: u32, page_size: usize) -> Result<Page<Cluster>, BackendError> {
        self.get_page("/clusters", page, page_size).await
    }

    async fn get_cluster(&self, cluster_id: &str) -> Result<Cluster, BackendError> {
        self.get_json(&format!("/clusters/{cluster_id}")).await
    }

    async fn list_cluster_instances(
        &self,
        cluster_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<Instance>, BackendError> {
        self.get_page(&format!("/clusters/{cluster_id}/instances"), page, page_size).await
    }

    async fn list_cluster_tags(&self, cluster_id: &str) -> Result<Vec<Tag>, BackendError> {
        self.get_json(&format!("/clusters/{cluster_id}/tags")).await
    }

    async fn list_cluster_events(
        &self,
        cluster_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Page<SystemEvent>, BackendError> {
        self.get_page(&format!("/clusters/{cluster_id}/events"), page, page_size).await
    }

    async fn power_on(&self, cluster_id: &str, request: &PowerRequest) -> Result<(), BackendError> {
        self.post_json(&format!("/clusters/{cluster_id}/power_on"), request).await
    }

    async fn power_off(&self, cluster_id: &str, request: &PowerRequest) -> Result<(), BackendError> {
        self.post_json(&format!("/clusters/{cluster_id}/power_off"), request).await
    }

    async fn list_instances(&self, page: u32, page_size: usize) -> Result<Page<Instance>, BackendError> {
        self.get_page("/instances", page, page_size).await
    }

    async fn get_instance(&self, instance_id: &str) -> Result<Instance, BackendError> {
        self.get_json(&format!("/instances/{instance_id}")).await
    }

    async fn list_events(&self, page: u32, page_size: usize) -> Result<Page<SystemEvent>, BackendError> {
        self.get_page("/events", page, page_size).await
    }

    async fn list_actions(&self, page: u32, page_size: usize) -> Result<Page<Action>, BackendError> {
        self.get_page("/schedule", page, page_size).await
    }

    async fn create_actions(&self, actions: &[NewAction]) -> Result<(), BackendError> {
        self.post_json("/schedule", actions).await
    }

    async fn enable_action(&self, action_id: &str) -> Result<(), BackendError> {
        self.post_empty(&format!("/schedule/{action_id}/enable")).await
    }

    async fn disable_action(&self, action_id: &str) -> Result<(), BackendError> {
        self.post_empty(&format!("/schedule/{action_id}/disable")).await
    }

    async fn delete_action(&self, action_id: &str) -> Result<(), BackendError> {
        let path = format!("/schedule/{action_id}");
        let what = format!("DELETE {path}");
        debug!("{}", what);
        self.send(self.client.delete(self.url(&path)), &what).await?;
        Ok(())
    }

    async fn overview(&self) -> Result<Overview, BackendError> {
        self.get_json("/overview").await
    }
}
