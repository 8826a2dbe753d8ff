//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::HINT_RETRY;
use crate::models::Overview;
use crate::utils::datetime::format_cost;

/// What the status bar shows this frame.
#[derive(Debug, Default)]
pub struct StatusInfo<'a> {
    pub overview: Option<&'a Overview>,
    pub error: Option<&'a str>,
    pub info: Option<&'a str>,
    pub busy: bool,
}

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Text of the left part: an error wins over info, info over the overview
    pub fn message(status: &StatusInfo) -> (String, Color) {
        if let Some(error) = status.error {
            return (format!("{} ({})", error, HINT_RETRY), Color::Red);
        }
        if let Some(info) = status.info {
            return (info.to_string(), Color::Green);
        }
        match status.overview {
            Some(o) => (
                format!(
                    "{} accounts • {}/{} clusters running • {} servers • {} this month • {} total",
                    o.account_count,
                    o.running_cluster_count,
                    o.cluster_count,
                    o.instance_count,
                    format_cost(o.current_month_cost),
                    format_cost(o.total_cost)
                ),
                Color::Gray,
            ),
            None => ("?: help • q: quit".to_string(), Color::Gray),
        }
    }

    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, status: &StatusInfo) {
        let (text, color) = Self::message(status);
        let spinner = if status.busy { " ⟳ " } else { " " };

        let line = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Yellow)),
            Span::styled(text, Style::default().fg(color)),
        ]);

        f.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
    }
}
