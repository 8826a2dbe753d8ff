//! Core UI functionality for the Nimbus application.
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait
//! - [`context`] - Shared services and settings
//! - [`event_handler`] - Terminal event polling
//! - [`task_manager`] - Background loads and API calls
//!
//! Components turn key events into [`Action`]s. The app component performs
//! them, spawning network work on the [`TaskManager`], whose results come back
//! as further actions on the next tick.

pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, DialogType, View};
pub use component::Component;
pub use context::AppContext;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
