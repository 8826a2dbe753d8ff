//! Modal dialog component for confirmations and read-only panels.
//!
//! Hosts every dialog except the power action dialog, which keeps its own form
//! state (see [`super::dialogs::ScheduleDialog`]):
//!
//! - **Confirmations** - power a cluster on/off, delete a scheduled action
//! - **Details** - cluster and server drill-downs
//! - **System** - logs and help
//!
//! Scrollable dialogs share one scroll offset, reset whenever a dialog opens.

use crate::logger::Logger;
use crate::service::actions::RowAction;
use crate::ui::components::dialogs::{confirm_dialogs, detail_dialogs, system_dialogs};
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, widgets::ScrollbarState, Frame};

const PAGE_SCROLL: usize = 10;

pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    pub scroll_offset: usize,
    pub scrollbar_state: ScrollbarState,
    logger: Logger,
}

impl DialogComponent {
    pub fn new(logger: Logger) -> Self {
        Self {
            dialog_type: None,
            scroll_offset: 0,
            scrollbar_state: ScrollbarState::new(0),
            logger,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    fn open(&mut self, dialog_type: DialogType) {
        self.dialog_type = Some(dialog_type);
        self.scroll_offset = 0;
        self.scrollbar_state = ScrollbarState::new(0);
    }

    fn clear_dialog(&mut self) {
        self.dialog_type = None;
        self.scroll_offset = 0;
        self.scrollbar_state = ScrollbarState::new(0);
    }

    /// Scrolling keys shared by the scrollable dialogs. Returns false if `key` is not one.
    fn handle_scroll_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_SCROLL),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_add(PAGE_SCROLL),
            KeyCode::Home => self.scroll_offset = 0,
            // Clamped to the content when rendering
            KeyCode::End => self.scroll_offset = usize::MAX,
            _ => return false,
        }
        true
    }

    /// Confirmed action, clearing the dialog.
    fn confirm(&mut self) -> Action {
        let action = match self.dialog_type.take() {
            Some(DialogType::ConfirmPower {
                cluster_id, operation, ..
            }) => Action::PowerCluster { cluster_id, operation },
            Some(DialogType::ConfirmDelete { action_id }) => Action::ApplyRowAction {
                action_id,
                row_action: RowAction::Delete,
            },
            _ => Action::None,
        };
        self.clear_dialog();
        action
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match &self.dialog_type {
            Some(DialogType::Logs) => match key.code {
                KeyCode::Esc | KeyCode::Char('L') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
            Some(DialogType::Help) => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
            Some(DialogType::ClusterDetail(_)) | Some(DialogType::InstanceDetail(_)) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
            Some(DialogType::ConfirmPower { .. }) | Some(DialogType::ConfirmDelete { .. }) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::HideDialog,
                _ => Action::None,
            },
            Some(DialogType::Schedule) | None => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            // The power action dialog is not hosted here
            Action::ShowDialog(DialogType::Schedule) => action,
            Action::ShowDialog(dialog_type) => {
                self.open(dialog_type);
                Action::None
            }
            Action::ClusterDetailLoaded(detail) => {
                self.open(DialogType::ClusterDetail(detail));
                Action::None
            }
            Action::InstanceDetailLoaded(instance) => {
                self.open(DialogType::InstanceDetail(instance));
                Action::None
            }
            Action::HideDialog => {
                self.clear_dialog();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        match &self.dialog_type {
            Some(DialogType::Logs) => {
                system_dialogs::render_logs_dialog(f, rect, &self.logger, self.scroll_offset, &mut self.scrollbar_state)
            }
            Some(DialogType::Help) => {
                system_dialogs::render_help_dialog(f, rect, self.scroll_offset, &mut self.scrollbar_state)
            }
            Some(DialogType::ClusterDetail(detail)) => detail_dialogs::render_cluster_detail(
                f,
                rect,
                detail,
                self.scroll_offset,
                &mut self.scrollbar_state,
            ),
            Some(DialogType::InstanceDetail(instance)) => detail_dialogs::render_instance_detail(
                f,
                rect,
                instance,
                self.scroll_offset,
                &mut self.scrollbar_state,
            ),
            Some(DialogType::ConfirmPower {
                cluster_name, operation, ..
            }) => confirm_dialogs::render_power_confirmation(f, rect, cluster_name, *operation),
            Some(DialogType::ConfirmDelete { action_id }) => {
                confirm_dialogs::render_delete_confirmation(f, rect, action_id)
            }
            Some(DialogType::Schedule) | None => {}
        }
    }
}
