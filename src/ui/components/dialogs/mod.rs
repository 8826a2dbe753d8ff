//! Dialog components module

pub mod common;
pub mod confirm_dialogs;
pub mod detail_dialogs;
pub mod schedule_dialog;
pub mod system_dialogs;

pub use schedule_dialog::ScheduleDialog;
