//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Success Messages
pub const SUCCESS_POWER_ON_REQUESTED: &str = "✅ Power on requested";
pub const SUCCESS_POWER_OFF_REQUESTED: &str = "✅ Power off requested";
pub const SUCCESS_ACTION_CREATED: &str = "✅ Scheduled action created";
pub const SUCCESS_ACTION_ENABLED: &str = "✅ Action enabled";
pub const SUCCESS_ACTION_DISABLED: &str = "✅ Action disabled";
pub const SUCCESS_ACTION_DELETED: &str = "✅ Action deleted";

// Error Messages
pub const ERROR_POWER_FAILED: &str = "❌ Failed to change cluster power state";
pub const ERROR_ACTION_CREATE_FAILED: &str = "❌ Failed to create scheduled action";
pub const ERROR_ACTION_UPDATE_FAILED: &str = "❌ Failed to update action";
pub const ERROR_LOAD_FAILED: &str = "❌ Failed to load";
pub const ERROR_NO_ACTION_SELECTED: &str = "❌ No scheduled action selected";

// Log Messages
pub const LOG_STALE_RESULT: &str = "⏭️  Dropping superseded result";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'L' or 'q' to close";
pub const DIALOG_TITLE_SCHEDULE: &str = "⏱  Cluster Power Action";
pub const HINT_RETRY: &str = "press 'r' to retry";
pub const LOADING: &str = "⏳ Loading...";

// Environment
pub const ENV_API_URL: &str = "NIMBUS_API_URL";
pub const ENV_USER_EMAIL: &str = "NIMBUS_USER_EMAIL";

// API Defaults
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_USER_HEADER: &str = "x-user-email";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Largest page size accepted for API pages and table pages
pub const MAX_PAGE_SIZE: usize = 1000;
/// Identity used when neither config nor server supplies one
pub const UNKNOWN_USER: &str = "unknown";

// UI Defaults
/// Rows per table page
pub const DEFAULT_PER_PAGE: usize = 20;
/// Search keystroke debounce in milliseconds
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 5000;
/// Lines kept by the in-memory log buffer
pub const LOG_BUFFER_CAPACITY: usize = 1000;
