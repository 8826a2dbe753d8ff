//! Reusable UI components

pub mod dialog_component;
pub mod dialogs;
pub mod disclosure;
pub mod resource_table;
pub mod status_bar;
pub mod table_row;

// Component exports
pub use dialog_component::DialogComponent;
pub use dialogs::ScheduleDialog;
pub use disclosure::{Disclosure, FilterMenu};
pub use resource_table::{ListPane, ResourceTable};
pub use status_bar::{StatusBar, StatusInfo};
pub use table_row::TableRow;
