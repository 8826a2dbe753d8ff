use crate::models::Operation;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::common::{create_dialog_block, create_instructions_paragraph, shortcuts};

fn render_confirmation(f: &mut Frame, area: Rect, title: &str, message: String, color: Color) {
    let dialog_area = LayoutManager::centered_rect(50, 30, area);
    f.render_widget(Clear, dialog_area);
    f.render_widget(create_dialog_block(title, color), dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(dialog_area);

    let message_paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let instructions = create_instructions_paragraph(&[shortcuts::CONFIRM_YES, shortcuts::SEPARATOR, shortcuts::CONFIRM_NO]);

    f.render_widget(message_paragraph, chunks[0]);
    f.render_widget(instructions, chunks[1]);
}

pub fn render_power_confirmation(f: &mut Frame, area: Rect, cluster_name: &str, operation: Operation) {
    let color = match operation {
        Operation::PowerOn => Color::Green,
        Operation::PowerOff => Color::Yellow,
    };
    let message = format!(
        "\n{} cluster \"{}\" now?\n\nThe new state shows up once the inventory is reloaded.",
        operation.label(),
        cluster_name
    );
    render_confirmation(f, area, "⚡ Confirm Power Action", message, color);
}

pub fn render_delete_confirmation(f: &mut Frame, area: Rect, action_id: &str) {
    let message = format!("\nDelete scheduled action {}?\n\nThis action cannot be undone!", action_id);
    render_confirmation(f, area, "⚠️  Confirm Delete", message, Color::Red);
}
