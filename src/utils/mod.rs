//! Utility modules for the Nimbus application.
//!
//! - [`cron`] - Validation of 5-field cron expressions
//! - [`datetime`] - Schedule time composition and human formatting
//! - [`debounce`] - Cancellable trailing-edge debouncer
//! - [`epoch`] - Fetch generations for discarding stale results
//! - [`filter`] - Search, filter, sort and paginate pipeline for list views

pub mod cron;
pub mod datetime;
pub mod debounce;
pub mod epoch;
pub mod filter;
