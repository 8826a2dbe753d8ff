//! Power action dialog: target, operation, and when to run it.
//!
//! All state lives in the [`ScheduleForm`]. The dialog only tracks which field
//! has focus and turns keys into [`FormMsg`]s.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::common::{
    create_dialog_block, create_input_paragraph, create_instructions_paragraph, create_selection_paragraph,
    shortcuts,
};
use crate::constants::DIALOG_TITLE_SCHEDULE;
use crate::models::Operation;
use crate::schedule::{ExecutionDraft, ExecutionMode, FormEffect, FormMsg, FormStep, ScheduleForm};
use crate::ui::core::{Action, Component};
use crate::ui::layout::LayoutManager;

const OPERATIONS: [Operation; 2] = [Operation::PowerOn, Operation::PowerOff];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Account,
    Cluster,
    Operation,
    Mode,
    Date,
    Time,
    Timezone,
    Cron,
}

impl Field {
    fn title(&self) -> &'static str {
        match self {
            Field::Account => "Account",
            Field::Cluster => "Cluster",
            Field::Operation => "Operation",
            Field::Mode => "When",
            Field::Date => "Date (YYYY-MM-DD)",
            Field::Time => "Time (HH:MM)",
            Field::Timezone => "Timezone (UTC, Local, +02:00, Europe/Madrid)",
            Field::Cron => "Cron expression (min hour dom month dow)",
        }
    }
}

/// Step `current` by one in `len` options, wrapping. `None` starts at the first.
fn step_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        None => 0,
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
    })
}

#[derive(Debug)]
pub struct ScheduleDialog {
    form: ScheduleForm,
    focus: Field,
}

impl Default for ScheduleDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleDialog {
    pub fn new() -> Self {
        Self {
            form: ScheduleForm::new(),
            focus: Field::Account,
        }
    }

    pub fn form(&self) -> &ScheduleForm {
        &self.form
    }

    pub fn is_open(&self) -> bool {
        self.form.is_open()
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Feed a message to the form and return the effect to carry out.
    pub fn apply(&mut self, msg: FormMsg) -> FormEffect {
        let effect = self.form.update(msg);
        if !self.form.is_open() || !self.fields().contains(&self.focus) {
            self.focus = Field::Account;
        }
        effect
    }

    /// Fields shown for the current execution mode, in focus order.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Account, Field::Cluster, Field::Operation, Field::Mode];
        match self.form.execution() {
            Some(ExecutionDraft::Scheduled { .. }) => fields.extend([Field::Date, Field::Time, Field::Timezone]),
            Some(ExecutionDraft::Cron { .. }) => fields.push(Field::Cron),
            Some(ExecutionDraft::Immediate) | None => {}
        }
        fields
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus);
        if let Some(next) = step_index(current, fields.len(), forward) {
            self.focus = fields[next];
        }
    }

    /// Choose the neighbouring option of a selection field.
    fn cycle(&self, forward: bool) -> Action {
        let msg = match self.focus {
            Field::Account => {
                let accounts = self.form.accounts();
                let current = self
                    .form
                    .selected_account_id()
                    .and_then(|id| accounts.iter().position(|a| a.id == id));
                step_index(current, accounts.len(), forward).map(|i| FormMsg::SelectAccount(accounts[i].id.clone()))
            }
            Field::Cluster => {
                let clusters = self.form.clusters();
                let current = self
                    .form
                    .selected_cluster()
                    .and_then(|c| clusters.iter().position(|other| other.id == c.id));
                step_index(current, clusters.len(), forward).map(|i| FormMsg::SelectCluster(clusters[i].id.clone()))
            }
            Field::Operation => {
                let current = self.form.operation().and_then(|op| OPERATIONS.iter().position(|o| *o == op));
                step_index(current, OPERATIONS.len(), forward).map(|i| FormMsg::SelectOperation(OPERATIONS[i]))
            }
            Field::Mode => {
                let current = self
                    .form
                    .execution()
                    .and_then(|e| ExecutionMode::ALL.iter().position(|m| *m == e.mode()));
                step_index(current, ExecutionMode::ALL.len(), forward).map(|i| FormMsg::SelectMode(ExecutionMode::ALL[i]))
            }
            _ => None,
        };
        msg.map(Action::Schedule).unwrap_or(Action::None)
    }

    fn text_value(&self, field: Field) -> String {
        match (field, self.form.execution()) {
            (Field::Date, Some(ExecutionDraft::Scheduled { date, .. })) => date.clone(),
            (Field::Time, Some(ExecutionDraft::Scheduled { time, .. })) => time.clone(),
            (Field::Timezone, Some(ExecutionDraft::Scheduled { timezone, .. })) => timezone.clone(),
            (Field::Cron, Some(ExecutionDraft::Cron { expression })) => expression.clone(),
            _ => String::new(),
        }
    }

    /// Edit the focused text field.
    fn edit(&self, edit: impl FnOnce(&mut String)) -> Action {
        let mut value = self.text_value(self.focus);
        edit(&mut value);
        let msg = match self.focus {
            Field::Date => FormMsg::SetDate(value),
            Field::Time => FormMsg::SetTime(value),
            Field::Timezone => FormMsg::SetTimezone(value),
            Field::Cron => FormMsg::SetCronExpression(value),
            _ => return Action::None,
        };
        Action::Schedule(msg)
    }

    fn is_text_field(&self) -> bool {
        matches!(self.focus, Field::Date | Field::Time | Field::Timezone | Field::Cron)
    }

    fn selection_value(&self, field: Field) -> String {
        match field {
            Field::Account => match self.form.selected_account() {
                Some(account) => format!("{} ({})", account.name, account.provider),
                None if self.form.accounts_loading() => "Loading accounts...".to_string(),
                None if self.form.accounts().is_empty() => "No accounts".to_string(),
                None => "Select an account".to_string(),
            },
            Field::Cluster => match self.form.selected_cluster() {
                Some(cluster) => format!("{} [{}] {}", cluster.name, cluster.status, cluster.region),
                None if self.form.selected_account_id().is_none() => "Select an account first".to_string(),
                None if self.form.clusters_loading() => "Loading clusters...".to_string(),
                None if self.form.clusters().is_empty() => "No clusters".to_string(),
                None => "Select a cluster".to_string(),
            },
            Field::Operation => self
                .form
                .operation()
                .map(|op| op.label().to_string())
                .unwrap_or_else(|| "Select an operation".to_string()),
            Field::Mode => self
                .form
                .execution()
                .map(|e| e.mode().label().to_string())
                .unwrap_or_else(|| "Select when to run".to_string()),
            _ => String::new(),
        }
    }

    fn status_line(&self) -> Paragraph<'static> {
        let (text, color) = match self.form.step() {
            FormStep::Submitting => ("⏳ Submitting...".to_string(), Color::Yellow),
            _ => match self.form.validate() {
                Ok(_) => ("✅ Ready, press Enter to submit".to_string(), Color::Green),
                Err(e) => (format!("• {}", e), Color::Gray),
            },
        };
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
    }
}

impl Component for ScheduleDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Esc {
            return Action::Schedule(FormMsg::Cancel);
        }
        if self.form.is_submitting() {
            return Action::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.move_focus(true);
                Action::None
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                Action::None
            }
            KeyCode::Enter => {
                if self.form.is_valid() {
                    Action::Schedule(FormMsg::Submit)
                } else {
                    self.move_focus(true);
                    Action::None
                }
            }
            KeyCode::Up if !self.is_text_field() => self.cycle(false),
            KeyCode::Down if !self.is_text_field() => self.cycle(true),
            KeyCode::Backspace if self.is_text_field() => self.edit(|value| {
                value.pop();
            }),
            KeyCode::Char(c) if self.is_text_field() => self.edit(|value| value.push(c)),
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.is_open() {
            return;
        }

        let fields = self.fields();
        let height = (fields.len() as u16) * 3 + 6;
        let area = LayoutManager::centered_rect(60, 100, rect);
        let area = Rect::new(
            area.x,
            rect.y + rect.height.saturating_sub(height) / 2,
            area.width,
            height.min(rect.height),
        );
        f.render_widget(Clear, area);
        f.render_widget(create_dialog_block(DIALOG_TITLE_SCHEDULE, Color::Cyan), area);

        let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(2));
        constraints.push(Constraint::Length(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(area);

        for (i, field) in fields.iter().enumerate() {
            let focused = *field == self.focus;
            let widget = match field {
                Field::Account | Field::Cluster | Field::Operation | Field::Mode => {
                    create_selection_paragraph(self.selection_value(*field), field.title(), focused)
                }
                _ => create_input_paragraph(&self.text_value(*field), field.title(), focused),
            };
            f.render_widget(widget, chunks[i]);
        }

        f.render_widget(self.status_line(), chunks[fields.len()]);

        let instructions = create_instructions_paragraph(&[
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ARROWS_CHANGE,
            shortcuts::SEPARATOR,
            shortcuts::ENTER_SUBMIT,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]);
        f.render_widget(instructions, chunks[fields.len() + 1]);
    }
}
