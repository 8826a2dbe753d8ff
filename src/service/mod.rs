//! Inventory service module for the nimbus application.
//!
//! This module provides the [`InventoryService`] struct, the data layer the UI
//! talks to. It turns paginated API endpoints into whole collections, issues
//! power requests on behalf of an explicit [`Identity`], and manages scheduled
//! actions.
//!
//! Every write to scheduled actions is followed by a reload of the full action
//! list, so callers always see server-computed fields such as `status`.

pub mod actions;
pub mod resources;

use log::info;
use std::sync::Arc;

use crate::backend::InventoryBackend;
use crate::constants::UNKNOWN_USER;
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Who is triggering power actions.
///
/// An explicitly configured email wins; otherwise the identity the server
/// reported in a response header is used, once one has been seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    configured: Option<String>,
}

impl Identity {
    pub fn new(configured: Option<String>) -> Self {
        Self {
            configured: configured.filter(|email| !email.trim().is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self { configured: None }
    }

    /// Resolve against what the backend observed.
    pub fn resolve(&self, backend: &dyn InventoryBackend) -> String {
        self.configured
            .clone()
            .or_else(|| backend.observed_user())
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    }
}

/// Data access layer over an [`InventoryBackend`].
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct InventoryService {
    backend: Arc<dyn InventoryBackend>,
    identity: Identity,
    page_size: usize,
}

impl InventoryService {
    pub fn new(backend: Arc<dyn InventoryBackend>, identity: Identity, page_size: usize) -> Self {
        info!(
            "Inventory service ready ({} backend, page size {})",
            backend.backend_type(),
            page_size
        );
        Self {
            backend,
            identity,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    pub fn backend(&self) -> Arc<dyn InventoryBackend> {
        Arc::clone(&self.backend)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Operator recorded as `triggered_by` on power requests.
    pub fn triggered_by(&self) -> String {
        self.identity.resolve(self.backend.as_ref())
    }
}
