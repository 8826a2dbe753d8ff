use nimbus::models::Overview;
use nimbus::ui::components::{StatusBar, StatusInfo};
use ratatui::style::Color;

fn overview() -> Overview {
    Overview {
        account_count: 3,
        cluster_count: 12,
        running_cluster_count: 7,
        instance_count: 40,
        total_cost: 10_500.0,
        current_month_cost: 812.25,
    }
}

#[test]
fn test_overview_summary() {
    let overview = overview();
    let (text, color) = StatusBar::message(&StatusInfo {
        overview: Some(&overview),
        ..Default::default()
    });

    assert_eq!(color, Color::Gray);
    assert!(text.contains("3 accounts"));
    assert!(text.contains("7/12 clusters running"));
    assert!(text.contains("$812.25 this month"));
    assert!(text.contains("$10,500.00 total"));
}

#[test]
fn test_error_wins_and_hints_retry() {
    let overview = overview();
    let (text, color) = StatusBar::message(&StatusInfo {
        overview: Some(&overview),
        error: Some("HTTP 500: boom"),
        info: Some("✅ Action enabled"),
        busy: false,
    });

    assert_eq!(color, Color::Red);
    assert!(text.starts_with("HTTP 500: boom"));
    assert!(text.contains("press 'r' to retry"));
}

#[test]
fn test_info_over_overview() {
    let overview = overview();
    let (text, color) = StatusBar::message(&StatusInfo {
        overview: Some(&overview),
        info: Some("✅ Action enabled"),
        ..Default::default()
    });

    assert_eq!(color, Color::Green);
    assert_eq!(text, "✅ Action enabled");
}

#[test]
fn test_default_hint() {
    let (text, _) = StatusBar::message(&StatusInfo::default());
    assert_eq!(text, "?: help • q: quit");
}
