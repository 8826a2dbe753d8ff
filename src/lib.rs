//! Nimbus - a terminal dashboard for a cloud resource inventory
//!
//! This library browses the accounts, clusters, servers, scheduled power
//! actions and events exposed by an inventory HTTP API, and schedules power
//! actions against clusters.
//!
//! # Modules
//!
//! * [`backend`] - Inventory API client
//! * [`config`] - Application configuration management
//! * [`pagination`] - Aggregation of paged list endpoints
//! * [`schedule`] - Power action scheduling and the dialog's form state
//! * [`service`] - Typed operations used by the UI
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Filtering, dates, cron, debounce and fetch epochs

/// Inventory API abstraction and its HTTP implementation
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging setup and the in-app log buffer
pub mod logger;

/// Inventory data model
pub mod models;

/// Fetching every page of a paged endpoint
pub mod pagination;

/// Power action scheduling
pub mod schedule;

/// Operations on the inventory used by the UI
pub mod service;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for lists, date/time handling and other helpers
pub mod utils;
