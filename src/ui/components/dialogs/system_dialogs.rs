use crate::constants::DIALOG_TITLE_LOGS;
use crate::logger::Logger;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, ScrollbarState},
    Frame,
};

use super::common::render_scrollable_lines;

const HELP_CONTENT: &str = r"
NIMBUS - Cloud Inventory Dashboard
==================================

VIEWS
-----
Tab/Shift+Tab  Next/previous view
1-5            Accounts, Clusters, Servers, Schedules, Events
r              Reload the current view

LISTS
-----
j/k ↑↓         Move selection
[ ] ←→         Previous/next page
/              Search (Enter to apply now, Esc to clear)
s              Sort by next column
S              Flip sort direction
f              Status filter
v              Provider filter (multi-select, Space to toggle)
t              Action type filter (Schedules)
c              Clear filters

CLUSTERS
--------
Enter          Cluster details (instances, tags, events)
p              Power on selected cluster
o              Power off selected cluster
a              New power action (now, at a time, or cron)

SERVERS
-------
Enter          Server details

SCHEDULES
---------
a              New power action
e              Enable selected action
d              Disable selected action
x              Delete selected action

GENERAL
-------
L              Show logs
?              Toggle this help
q / Ctrl+C     Quit

Press 'Esc' or '?' to close this help panel
";

pub fn render_help_dialog(f: &mut Frame, area: Rect, scroll_offset: usize, scrollbar_state: &mut ScrollbarState) {
    let help_area = LayoutManager::centered_rect(70, 90, area);
    f.render_widget(Clear, help_area);

    let lines = HELP_CONTENT.lines().map(|l| Line::from(l.to_string())).collect();
    render_scrollable_lines(
        f,
        help_area,
        "📖 Help - Press 'Esc' or '?' to close",
        lines,
        scroll_offset,
        scrollbar_state,
    );
}

fn log_line(entry: String) -> Line<'static> {
    let color = if entry.contains("ERROR") || entry.contains("❌") {
        Color::Red
    } else if entry.contains("WARN") {
        Color::Yellow
    } else if entry.contains("✅") {
        Color::Green
    } else if entry.contains("DEBUG") {
        Color::DarkGray
    } else {
        Color::White
    };
    Line::from(Span::styled(entry, Style::default().fg(color)))
}

pub fn render_logs_dialog(
    f: &mut Frame,
    area: Rect,
    logger: &Logger,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) {
    let logs_area = LayoutManager::centered_rect(90, 90, area);
    f.render_widget(Clear, logs_area);

    let logs = logger.get_logs();
    let lines = if logs.is_empty() {
        vec![Line::from("No logs yet")]
    } else {
        logs.into_iter().map(log_line).collect()
    };

    render_scrollable_lines(f, logs_area, DIALOG_TITLE_LOGS, lines, scroll_offset, scrollbar_state);
}
