//! Read-only drill-down panels for a cluster or an instance.

use crate::models::{Instance, Tag};
use crate::service::resources::ClusterDetail;
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::{format_cost, format_timestamp};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, ScrollbarState},
    Frame,
};

use super::common::render_scrollable_lines;

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn pair(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn tag_lines(tags: &[Tag]) -> Vec<Line<'static>> {
    if tags.is_empty() {
        return vec![Line::from("  (none)")];
    }
    tags.iter()
        .map(|tag| Line::from(format!("  {} = {}", tag.key, tag.value)))
        .collect()
}

/// Lines of the cluster panel.
pub fn cluster_detail_lines(detail: &ClusterDetail) -> Vec<Line<'static>> {
    let cluster = &detail.cluster;
    let mut lines = vec![
        pair("Name", cluster.name.clone()),
        pair("ID", cluster.id.clone()),
        pair("Account", format!("{} ({})", cluster.account_name, cluster.account_id)),
        pair("Provider", cluster.provider.to_string()),
        pair("Region", cluster.region.clone()),
        pair("Status", cluster.status.to_string()),
        pair("Current month", format_cost(cluster.costs.current_month_cost)),
        pair("Last month", format_cost(cluster.costs.last_month_cost)),
        pair("Total", format_cost(cluster.costs.total_cost)),
        pair("Created", format_timestamp(cluster.created_at.as_ref())),
        pair("Last scan", format_timestamp(cluster.last_scan_timestamp.as_ref())),
    ];
    if let Some(link) = &cluster.console_link {
        lines.push(pair("Console", link.clone()));
    }

    lines.push(Line::from(""));
    lines.push(heading(&format!("Instances ({})", detail.instances.len())));
    if detail.instances.is_empty() {
        lines.push(Line::from("  (none)"));
    }
    for instance in &detail.instances {
        lines.push(Line::from(format!(
            "  {:<24} {:<14} {:<14} {:<10} {}",
            instance.name,
            instance.instance_type,
            instance.availability_zone,
            instance.status,
            format_cost(instance.costs.current_month_cost)
        )));
    }

    lines.push(Line::from(""));
    lines.push(heading(&format!("Tags ({})", detail.tags.len())));
    lines.extend(tag_lines(&detail.tags));

    lines.push(Line::from(""));
    lines.push(heading(&format!("Events ({})", detail.events.len())));
    if detail.events.is_empty() {
        lines.push(Line::from("  (none)"));
    }
    for event in &detail.events {
        lines.push(Line::from(format!(
            "  {:<22} {:<12} {:<8} {} {}",
            format_timestamp(event.timestamp.as_ref()),
            event.action,
            event.result,
            event.triggered_by,
            event.description
        )));
    }
    lines
}

/// Lines of the instance panel.
pub fn instance_detail_lines(instance: &Instance) -> Vec<Line<'static>> {
    let mut lines = vec![
        pair("Name", instance.name.clone()),
        pair("ID", instance.id.clone()),
        pair("Type", instance.instance_type.clone()),
        pair("Zone", instance.availability_zone.clone()),
        pair("Cluster", format!("{} ({})", instance.cluster_name, instance.cluster_id)),
        pair("Provider", instance.provider.to_string()),
        pair("Status", instance.status.to_string()),
        pair("Current month", format_cost(instance.costs.current_month_cost)),
        pair("Total", format_cost(instance.costs.total_cost)),
        Line::from(""),
        heading(&format!("Tags ({})", instance.tags.len())),
    ];
    lines.extend(tag_lines(&instance.tags));
    lines
}

pub fn render_cluster_detail(
    f: &mut Frame,
    area: Rect,
    detail: &ClusterDetail,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) {
    let dialog_area = LayoutManager::centered_rect(85, 85, area);
    f.render_widget(Clear, dialog_area);
    let title = format!("☁  Cluster {} - Press 'Esc' to close", detail.cluster.name);
    render_scrollable_lines(
        f,
        dialog_area,
        &title,
        cluster_detail_lines(detail),
        scroll_offset,
        scrollbar_state,
    );
}

pub fn render_instance_detail(
    f: &mut Frame,
    area: Rect,
    instance: &Instance,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) {
    let dialog_area = LayoutManager::centered_rect(70, 70, area);
    f.render_widget(Clear, dialog_area);
    let title = format!("🖥  Server {} - Press 'Esc' to close", instance.name);
    render_scrollable_lines(
        f,
        dialog_area,
        &title,
        instance_detail_lines(instance),
        scroll_offset,
        scrollbar_state,
    );
}
