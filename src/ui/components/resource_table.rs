//! Generic list view over one resource collection.
//!
//! The table holds the full dataset and derives the visible page from it with
//! a [`ListQuery`] on every render. Search keystrokes are reported as
//! [`Action::SearchChanged`] so the app can debounce them; the query only
//! changes once [`ResourceTable::apply_search`] is called with the settled value.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::disclosure::{FilterMenu, MenuOutcome, Selection};
use super::table_row::{action_type_options, TableRow};
use crate::constants::LOADING;
use crate::models::Provider;
use crate::ui::core::{Action, Component, View};
use crate::ui::layout::LayoutManager;
use crate::utils::filter::{ListQuery, ListView, SortDirection, SortSpec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuKind {
    Status,
    Provider,
    ActionType,
}

impl MenuKind {
    /// Key that opens the menu, and closes it again while open.
    fn shortcut(&self) -> KeyCode {
        match self {
            MenuKind::Status => KeyCode::Char('f'),
            MenuKind::Provider => KeyCode::Char('v'),
            MenuKind::ActionType => KeyCode::Char('t'),
        }
    }
}

pub struct ResourceTable<T: TableRow> {
    view: View,
    items: Vec<T>,
    query: ListQuery,
    search_input: String,
    searching: bool,
    selected: usize,
    loading: bool,
    sort_column: Option<usize>,
    status_menu: Option<FilterMenu>,
    provider_menu: Option<FilterMenu>,
    type_menu: Option<FilterMenu>,
    table_state: TableState,
}

impl<T: TableRow> ResourceTable<T> {
    pub fn new(view: View, per_page: usize) -> Self {
        let status_options = T::status_options();
        let status_menu = (!status_options.is_empty()).then(|| FilterMenu::new("Status", status_options, Selection::Single));
        let provider_menu = T::has_provider().then(|| {
            FilterMenu::new(
                "Provider",
                Provider::ALL
                    .iter()
                    .filter(|p| **p != Provider::Unknown)
                    .map(|p| p.as_str().to_string())
                    .collect(),
                Selection::Multiple,
            )
        });
        let type_menu = T::has_action_type().then(|| FilterMenu::new("Type", action_type_options(), Selection::Single));

        Self {
            view,
            items: Vec::new(),
            query: ListQuery::with_per_page(per_page),
            search_input: String::new(),
            searching: false,
            selected: 0,
            loading: false,
            sort_column: None,
            status_menu,
            provider_menu,
            type_menu,
            table_state: TableState::default(),
        }
    }

    /// Replace the dataset with a fresh load.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.clamp_position();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// The visible page under the current query.
    pub fn list_view(&self) -> ListView<T> {
        self.query.apply(&self.items, T::search_fields())
    }

    pub fn selected_item(&self) -> Option<T> {
        self.list_view().items.get(self.selected).cloned()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Whether keys are going to the search box or an open menu.
    pub fn is_capturing_input(&self) -> bool {
        self.searching || self.open_menu().is_some()
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Commit a settled search query.
    pub fn apply_search(&mut self, query: &str) {
        if self.query.search == query {
            return;
        }
        self.query.search = query.to_string();
        self.filters_changed();
    }

    pub fn next_page(&mut self) {
        if self.query.page < self.list_view().page_count() {
            self.query.page += 1;
            self.selected = 0;
        }
    }

    pub fn previous_page(&mut self) {
        if self.query.page > 1 {
            self.query.page -= 1;
            self.selected = 0;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.list_view().items.len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the sort to the next column; past the last one, sorting is off.
    pub fn cycle_sort(&mut self) {
        let columns = T::columns();
        self.sort_column = match self.sort_column {
            None if !columns.is_empty() => Some(0),
            Some(i) if i + 1 < columns.len() => Some(i + 1),
            _ => None,
        };
        let direction = self.query.sort.as_ref().map(|s| s.direction).unwrap_or_default();
        self.query.sort = self.sort_column.map(|i| SortSpec::new(columns[i].field, direction));
    }

    pub fn flip_sort(&mut self) {
        if let Some(sort) = &mut self.query.sort {
            sort.direction = sort.direction.flip();
        }
    }

    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.query.sort.as_ref().map(|s| s.direction)
    }

    pub fn clear_filters(&mut self) {
        for menu in [&mut self.status_menu, &mut self.provider_menu, &mut self.type_menu]
            .into_iter()
            .flatten()
        {
            menu.clear();
            menu.close();
        }
        self.sync_filters();
    }

    fn menu_mut(&mut self, kind: MenuKind) -> Option<&mut FilterMenu> {
        match kind {
            MenuKind::Status => self.status_menu.as_mut(),
            MenuKind::Provider => self.provider_menu.as_mut(),
            MenuKind::ActionType => self.type_menu.as_mut(),
        }
    }

    fn open_menu(&self) -> Option<MenuKind> {
        let is_open = |menu: &Option<FilterMenu>| menu.as_ref().map(FilterMenu::is_open).unwrap_or(false);
        if is_open(&self.status_menu) {
            Some(MenuKind::Status)
        } else if is_open(&self.provider_menu) {
            Some(MenuKind::Provider)
        } else if is_open(&self.type_menu) {
            Some(MenuKind::ActionType)
        } else {
            None
        }
    }

    /// Open or close `kind`, closing whichever other menu was open.
    fn toggle_menu(&mut self, kind: MenuKind) {
        if self.open_menu().is_some_and(|open| open != kind) {
            for menu in [&mut self.status_menu, &mut self.provider_menu, &mut self.type_menu]
                .into_iter()
                .flatten()
            {
                menu.close();
            }
        }
        if let Some(menu) = self.menu_mut(kind) {
            menu.toggle();
        }
    }

    /// Copy menu choices into the query.
    fn sync_filters(&mut self) {
        self.query.status = self
            .status_menu
            .as_ref()
            .and_then(|m| m.value().map(str::to_string));
        self.query.providers = self
            .provider_menu
            .as_ref()
            .map(|m| {
                m.chosen()
                    .iter()
                    .filter_map(|name| Provider::ALL.iter().copied().find(|p| p.as_str() == name))
                    .collect()
            })
            .unwrap_or_default();
        self.query.action_type = self.type_menu.as_ref().and_then(|m| m.value().map(str::to_string));
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        self.query.reset_page();
        self.selected = 0;
    }

    fn clamp_position(&mut self) {
        let page_count = self.list_view().page_count();
        if self.query.page > page_count {
            self.query.page = page_count.max(1);
        }
        let len = self.list_view().items.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => {
                self.searching = false;
                Action::SearchCommitted {
                    view: self.view,
                    query: self.search_input.clone(),
                }
            }
            KeyCode::Esc => {
                self.searching = false;
                self.search_input.clear();
                Action::SearchCommitted {
                    view: self.view,
                    query: String::new(),
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                Action::SearchChanged {
                    view: self.view,
                    query: self.search_input.clone(),
                }
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                Action::SearchChanged {
                    view: self.view,
                    query: self.search_input.clone(),
                }
            }
            _ => Action::None,
        }
    }

    fn render_filter_bar(&self, f: &mut Frame, area: Rect) {
        let search_style = if self.searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if self.searching { "█" } else { "" };

        let mut spans = vec![
            Span::styled("Search: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{}{}", self.search_input, cursor), search_style),
        ];
        for menu in [&self.status_menu, &self.provider_menu, &self.type_menu].into_iter().flatten() {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
            let style = if menu.chosen().is_empty() {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::Magenta)
            };
            spans.push(Span::styled(menu.summary(), style));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.view.title()))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect, list: &ListView<T>) {
        let columns = T::columns();
        let header_cells = columns.iter().enumerate().map(|(i, column)| {
            let title = match (self.sort_column, self.sort_direction()) {
                (Some(sorted), Some(direction)) if sorted == i => format!("{} {}", column.title, direction.arrow()),
                _ => column.title.to_string(),
            };
            Cell::from(title).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        });
        let header = Row::new(header_cells).height(1);

        let rows = list.items.iter().map(|item| {
            let style = item.color().map(|c| Style::default().fg(c)).unwrap_or_default();
            Row::new(item.cells().into_iter().map(Cell::from)).style(style)
        });

        let widths: Vec<_> = columns.iter().map(|c| c.width).collect();
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::LEFT | Borders::RIGHT))
            .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        if list.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(self.selected));
        }
        f.render_stateful_widget(table, area, &mut self.table_state);

        if list.is_empty() {
            let message = if self.loading { LOADING } else { "No results" };
            let inner = Rect::new(area.x, area.y + 2.min(area.height), area.width, 1.min(area.height));
            f.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(Color::Gray))
                    .alignment(ratatui::layout::Alignment::Center),
                inner,
            );
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect, list: &ListView<T>) {
        let loading = if self.loading { "  ⟳" } else { "" };
        let text = format!(
            "Page {}/{} • {} of {} {}{}",
            list.page,
            list.page_count(),
            list.total,
            self.items.len(),
            self.view.name(),
            loading
        );
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::Gray))
                .alignment(ratatui::layout::Alignment::Right),
            area,
        );
    }
}

impl<T: TableRow> Component for ResourceTable<T> {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if let Some(kind) = self.open_menu() {
            if key.code == kind.shortcut() {
                self.toggle_menu(kind);
                return Action::None;
            }
            let outcome = match self.menu_mut(kind) {
                Some(menu) => menu.handle_key(key),
                None => MenuOutcome::Closed,
            };
            match outcome {
                MenuOutcome::Handled => return Action::None,
                MenuOutcome::Changed => {
                    self.sync_filters();
                    return Action::None;
                }
                // The menu closed on an outside key; handle the key as usual.
                MenuOutcome::Closed => {}
            }
        }

        if self.searching {
            return self.handle_search_key(key);
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Action::None
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char(']') => {
                self.next_page();
                Action::None
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('[') => {
                self.previous_page();
                Action::None
            }
            KeyCode::Char('/') => {
                self.searching = true;
                Action::None
            }
            KeyCode::Char('s') => {
                self.cycle_sort();
                Action::None
            }
            KeyCode::Char('S') => {
                self.flip_sort();
                Action::None
            }
            KeyCode::Char('f') if self.status_menu.is_some() => {
                self.toggle_menu(MenuKind::Status);
                Action::None
            }
            KeyCode::Char('v') if self.provider_menu.is_some() => {
                self.toggle_menu(MenuKind::Provider);
                Action::None
            }
            KeyCode::Char('t') if self.type_menu.is_some() => {
                self.toggle_menu(MenuKind::ActionType);
                Action::None
            }
            KeyCode::Char('c') => {
                self.clear_filters();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::SearchCommitted { view, ref query } if view == self.view => {
                self.apply_search(query);
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::table_layout(rect);
        let list = self.list_view();

        self.render_filter_bar(f, chunks[0]);
        self.render_table(f, chunks[1], &list);
        self.render_footer(f, chunks[2], &list);

        if let Some(kind) = self.open_menu() {
            let anchor = Rect::new(chunks[0].x + 2, chunks[0].y + 1, chunks[0].width.saturating_sub(4), 1);
            let menu = match kind {
                MenuKind::Status => self.status_menu.as_ref(),
                MenuKind::Provider => self.provider_menu.as_ref(),
                MenuKind::ActionType => self.type_menu.as_ref(),
            };
            if let Some(menu) = menu {
                menu.render(f, anchor);
            }
        }
    }
}

/// Object-safe view of a table, for code that handles whichever view is active.
pub trait ListPane: Component {
    fn is_capturing_input(&self) -> bool;
    fn set_loading(&mut self, loading: bool);
    fn is_loading(&self) -> bool;
    fn len(&self) -> usize;
}

impl<T: TableRow> ListPane for ResourceTable<T> {
    fn is_capturing_input(&self) -> bool {
        ResourceTable::is_capturing_input(self)
    }

    fn set_loading(&mut self, loading: bool) {
        ResourceTable::set_loading(self, loading)
    }

    fn is_loading(&self) -> bool {
        ResourceTable::is_loading(self)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
