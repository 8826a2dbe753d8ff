//! Open/close state shared by every popup menu.
//!
//! A [`Disclosure`] is either open or closed. Interaction the owner does not
//! handle while it is open counts as an outside interaction and closes it.
//! [`FilterMenu`] builds the status, provider and action-type menus on top.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
    Frame,
};

use crate::ui::layout::LayoutManager;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Disclosure {
    open: bool,
}

impl Disclosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Something outside the popup was touched.
    pub fn outside_interaction(&mut self) {
        self.close();
    }
}

/// Whether a menu keeps one choice or a set of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Single,
    Multiple,
}

/// What the owner should do after a key reached an open menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Key consumed, nothing changed for the list.
    Handled,
    /// The chosen values changed.
    Changed,
    /// Not for the menu; it has closed and the key should be handled elsewhere.
    Closed,
}

/// A titled list of options behind a [`Disclosure`].
///
/// Single-choice menus treat "nothing chosen" as "all"; choosing the current
/// value again clears it.
#[derive(Clone, Debug)]
pub struct FilterMenu {
    title: &'static str,
    options: Vec<String>,
    chosen: Vec<String>,
    cursor: usize,
    selection: Selection,
    disclosure: Disclosure,
}

impl FilterMenu {
    pub fn new(title: &'static str, options: Vec<String>, selection: Selection) -> Self {
        Self {
            title,
            options,
            chosen: Vec::new(),
            cursor: 0,
            selection,
            disclosure: Disclosure::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn chosen(&self) -> &[String] {
        &self.chosen
    }

    /// The single chosen value, for single-choice menus.
    pub fn value(&self) -> Option<&str> {
        self.chosen.first().map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    pub fn open(&mut self) {
        self.disclosure.open();
    }

    pub fn close(&mut self) {
        self.disclosure.close();
    }

    pub fn toggle(&mut self) {
        self.disclosure.toggle();
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    /// Short label for the filter bar, e.g. `Status: Running`.
    pub fn summary(&self) -> String {
        if self.chosen.is_empty() {
            format!("{}: All", self.title)
        } else {
            format!("{}: {}", self.title, self.chosen.join(", "))
        }
    }

    /// Flip the option under the cursor.
    pub fn toggle_current(&mut self) -> bool {
        let Some(option) = self.options.get(self.cursor).cloned() else {
            return false;
        };

        match self.selection {
            Selection::Single => {
                if self.chosen.first() == Some(&option) {
                    self.chosen.clear();
                } else {
                    self.chosen = vec![option];
                }
            }
            Selection::Multiple => {
                if let Some(pos) = self.chosen.iter().position(|c| *c == option) {
                    self.chosen.remove(pos);
                } else {
                    self.chosen.push(option);
                }
            }
        }
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MenuOutcome {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                MenuOutcome::Handled
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.options.len() {
                    self.cursor += 1;
                }
                MenuOutcome::Handled
            }
            KeyCode::Char(' ') => {
                if self.toggle_current() {
                    MenuOutcome::Changed
                } else {
                    MenuOutcome::Handled
                }
            }
            KeyCode::Enter => {
                let changed = self.toggle_current();
                if self.selection == Selection::Single {
                    self.close();
                }
                if changed {
                    MenuOutcome::Changed
                } else {
                    MenuOutcome::Handled
                }
            }
            KeyCode::Esc => {
                self.close();
                MenuOutcome::Handled
            }
            _ => {
                self.disclosure.outside_interaction();
                MenuOutcome::Closed
            }
        }
    }

    /// Draw the open menu as a dropdown under `anchor`.
    pub fn render(&self, f: &mut Frame, anchor: Rect) {
        if !self.is_open() {
            return;
        }

        let width = self
            .options
            .iter()
            .map(|o| o.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.title.len()) as u16
            + 8;
        let height = self.options.len() as u16 + 2;
        let area = LayoutManager::dropdown_rect(anchor, width, height, f.area());
        f.render_widget(Clear, area);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let mark = match (self.selection, self.chosen.contains(option)) {
                    (Selection::Multiple, true) => "[x] ",
                    (Selection::Multiple, false) => "[ ] ",
                    (Selection::Single, true) => "(•) ",
                    (Selection::Single, false) => "( ) ",
                };
                let style = if i == self.cursor {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![Span::styled(mark, style), Span::styled(option.clone(), style)]))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().fg(Color::Cyan));

        f.render_widget(List::new(items).block(block), area);
    }
}
