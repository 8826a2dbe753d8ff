use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nimbus::models::{Action as ScheduledAction, ActionTrigger, Cluster, ClusterStatus, Operation, Provider};
use nimbus::ui::components::ResourceTable;
use nimbus::ui::core::{Action, Component, View};
use nimbus::utils::filter::SortDirection;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn cluster(name: &str, status: ClusterStatus, provider: Provider) -> Cluster {
    Cluster {
        id: format!("id-{name}"),
        name: name.to_string(),
        status,
        provider,
        ..Default::default()
    }
}

fn table() -> ResourceTable<Cluster> {
    let mut table = ResourceTable::new(View::Clusters, 2);
    table.set_items(vec![
        cluster("payments", ClusterStatus::Running, Provider::Aws),
        cluster("analytics", ClusterStatus::Stopped, Provider::Gcp),
        cluster("search", ClusterStatus::Running, Provider::Azure),
        cluster("batch", ClusterStatus::Stopped, Provider::Aws),
        cluster("archive", ClusterStatus::Terminated, Provider::Aws),
    ]);
    table
}

fn visible(table: &ResourceTable<Cluster>) -> Vec<String> {
    table.list_view().items.into_iter().map(|c| c.name).collect()
}

#[test]
fn test_paging_and_selection() {
    let mut table = table();
    assert_eq!(table.list_view().page_count(), 3);
    assert_eq!(visible(&table), vec!["payments", "analytics"]);

    table.handle_key_events(key(KeyCode::Char('j')));
    assert_eq!(table.selected_item().map(|c| c.name), Some("analytics".to_string()));

    // Selection does not run past the page
    table.handle_key_events(key(KeyCode::Char('j')));
    assert_eq!(table.selected_index(), 1);

    table.handle_key_events(key(KeyCode::Char(']')));
    table.handle_key_events(key(KeyCode::Char(']')));
    table.handle_key_events(key(KeyCode::Char(']')));
    assert_eq!(table.query().page, 3);
    assert_eq!(visible(&table), vec!["archive"]);
    assert_eq!(table.selected_index(), 0);

    table.handle_key_events(key(KeyCode::Char('[')));
    assert_eq!(table.query().page, 2);
}

#[test]
fn test_search_emits_changes_and_commits() {
    let mut table = table();

    assert!(matches!(table.handle_key_events(key(KeyCode::Char('/'))), Action::None));
    assert!(table.is_capturing_input());

    let action = table.handle_key_events(key(KeyCode::Char('a')));
    assert!(matches!(action, Action::SearchChanged { view: View::Clusters, ref query } if query == "a"));
    table.handle_key_events(key(KeyCode::Char('r')));
    assert_eq!(table.search_input(), "ar");

    // Nothing is filtered until the query is committed
    assert_eq!(table.list_view().total, 5);

    let action = table.handle_key_events(key(KeyCode::Enter));
    assert!(matches!(action, Action::SearchCommitted { ref query, .. } if query == "ar"));
    assert!(!table.is_capturing_input());

    assert!(matches!(table.update(action), Action::None));
    assert_eq!(visible(&table), vec!["search", "archive"]);
}

#[test]
fn test_search_commit_resets_page() {
    let mut table = table();
    table.next_page();
    assert_eq!(table.query().page, 2);

    table.apply_search("payments");
    assert_eq!(table.query().page, 1);
    assert_eq!(visible(&table), vec!["payments"]);
}

#[test]
fn test_escape_clears_search() {
    let mut table = table();
    table.apply_search("batch");

    table.handle_key_events(key(KeyCode::Char('/')));
    table.handle_key_events(key(KeyCode::Char('x')));
    let action = table.handle_key_events(key(KeyCode::Esc));

    assert!(matches!(action, Action::SearchCommitted { ref query, .. } if query.is_empty()));
    assert_eq!(table.search_input(), "");
    table.update(action);
    assert_eq!(table.list_view().total, 5);
}

#[test]
fn test_commit_for_other_view_is_ignored() {
    let mut table = table();
    let action = table.update(Action::SearchCommitted {
        view: View::Accounts,
        query: "payments".to_string(),
    });

    assert!(matches!(action, Action::SearchCommitted { .. }));
    assert_eq!(table.list_view().total, 5);
}

#[test]
fn test_sort_cycles_columns_then_off() {
    let mut table = table();

    table.handle_key_events(key(KeyCode::Char('s')));
    assert_eq!(table.query().sort.as_ref().map(|s| s.field.as_str()), Some("name"));
    assert_eq!(visible(&table), vec!["analytics", "archive"]);

    table.handle_key_events(key(KeyCode::Char('S')));
    assert_eq!(table.sort_direction(), Some(SortDirection::Desc));
    assert_eq!(visible(&table), vec!["search", "payments"]);

    let columns = <Cluster as nimbus::ui::components::TableRow>::columns().len();
    for _ in 1..columns {
        table.cycle_sort();
    }
    assert!(table.query().sort.is_some());
    table.cycle_sort();
    assert!(table.query().sort.is_none());
}

#[test]
fn test_status_menu_filters() {
    let mut table = table();

    table.handle_key_events(key(KeyCode::Char('f')));
    assert!(table.is_capturing_input());

    // Cursor starts on "Running"
    table.handle_key_events(key(KeyCode::Enter));
    assert!(!table.is_capturing_input());
    assert_eq!(table.query().status.as_deref(), Some("Running"));
    assert_eq!(visible(&table), vec!["payments", "search"]);

    table.handle_key_events(key(KeyCode::Char('c')));
    assert_eq!(table.query().status, None);
    assert_eq!(table.list_view().total, 5);
}

#[test]
fn test_menu_shortcut_closes_its_own_menu() {
    let mut table = table();

    table.handle_key_events(key(KeyCode::Char('f')));
    assert!(table.is_capturing_input());
    table.handle_key_events(key(KeyCode::Char('f')));
    assert!(!table.is_capturing_input());

    // Another menu's shortcut swaps menus instead
    table.handle_key_events(key(KeyCode::Char('f')));
    table.handle_key_events(key(KeyCode::Char('v')));
    assert!(table.is_capturing_input());
    table.handle_key_events(key(KeyCode::Char('v')));
    assert!(!table.is_capturing_input());
    assert_eq!(table.query().status, None);
}

#[test]
fn test_provider_menu_allows_several() {
    let mut table = table();

    table.handle_key_events(key(KeyCode::Char('v')));
    // AWS, then down to GCP
    table.handle_key_events(key(KeyCode::Char(' ')));
    table.handle_key_events(key(KeyCode::Down));
    table.handle_key_events(key(KeyCode::Down));
    table.handle_key_events(key(KeyCode::Char(' ')));
    table.handle_key_events(key(KeyCode::Esc));

    assert_eq!(table.query().providers, vec![Provider::Aws, Provider::Gcp]);
    assert_eq!(table.list_view().total, 4);
}

#[test]
fn test_reload_keeps_position_in_range() {
    let mut table = table();
    table.next_page();
    table.next_page();

    table.set_items(vec![cluster("only", ClusterStatus::Running, Provider::Aws)]);

    assert_eq!(table.query().page, 1);
    assert_eq!(table.selected_item().map(|c| c.name), Some("only".to_string()));
}

#[test]
fn test_action_type_menu_only_on_schedules() {
    let mut clusters = table();
    clusters.handle_key_events(key(KeyCode::Char('t')));
    assert!(!clusters.is_capturing_input());

    let mut schedules: ResourceTable<ScheduledAction> = ResourceTable::new(View::Schedules, 10);
    schedules.set_items(vec![
        ScheduledAction {
            id: "x1".to_string(),
            account_id: "a1".to_string(),
            cluster_id: "c1".to_string(),
            operation: Operation::PowerOn,
            status: Default::default(),
            enabled: true,
            region: String::new(),
            trigger: ActionTrigger::Cron {
                cron_expression: "0 7 * * *".to_string(),
            },
        },
        ScheduledAction {
            id: "x2".to_string(),
            account_id: "a1".to_string(),
            cluster_id: "c1".to_string(),
            operation: Operation::PowerOff,
            status: Default::default(),
            enabled: true,
            region: String::new(),
            trigger: ActionTrigger::Scheduled {
                time: chrono::DateTime::parse_from_rfc3339("2025-03-14T20:00:00+00:00").unwrap(),
            },
        },
    ]);

    schedules.handle_key_events(key(KeyCode::Char('t')));
    assert!(schedules.is_capturing_input());
    schedules.handle_key_events(key(KeyCode::Enter));

    assert_eq!(schedules.query().action_type.as_deref(), Some("scheduled_action"));
    assert_eq!(schedules.selected_item().map(|a| a.id), Some("x2".to_string()));
}
