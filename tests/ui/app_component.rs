use crate::fake_backend::{account, cluster, cron_action, FakeBackend};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nimbus::config::Config;
use nimbus::constants::{ERROR_ACTION_UPDATE_FAILED, ERROR_LOAD_FAILED, ERROR_NO_ACTION_SELECTED, SUCCESS_ACTION_DISABLED};
use nimbus::logger::Logger;
use nimbus::service::{Identity, InventoryService};
use nimbus::ui::core::{Action, AppContext, Component, EventType, View};
use nimbus::ui::AppComponent;
use ratatui::{backend::TestBackend, Terminal};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn app_with(backend: Arc<FakeBackend>, config: Config) -> AppComponent {
    let service = InventoryService::new(backend, Identity::anonymous(), 100);
    AppComponent::new(AppContext::new(service, Logger::new(), config))
}

fn inventory() -> Arc<FakeBackend> {
    Arc::new(FakeBackend {
        accounts: vec![account("a1", "prod"), account("a2", "staging")],
        clusters: vec![cluster("c1", "a1"), cluster("c2", "a1"), cluster("c3", "a2")],
        actions: Mutex::new(vec![cron_action("x1", "c1"), cron_action("x2", "c2")]),
        ..Default::default()
    })
}

fn press(app: &mut AppComponent, code: KeyCode) {
    app.handle_event(EventType::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        .unwrap();
}

fn type_text(app: &mut AppComponent, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Feed background results back into the app until nothing is in flight.
async fn settle(app: &mut AppComponent) {
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let actions = app.process_background_actions();
        let idle = actions.is_empty() && !app.is_busy();
        for action in actions {
            let action = app.update(action);
            app.handle_app_action(action);
        }
        if idle {
            return;
        }
    }
    panic!("background work did not settle");
}

fn screen(app: &mut AppComponent) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
    terminal.draw(|f| app.render(f, f.area())).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test]
async fn test_start_loads_default_view_and_overview() {
    let backend = inventory();
    let mut app = app_with(backend.clone(), Config::default());

    app.start();
    assert_eq!(app.current_view(), View::Clusters);
    assert!(app.is_loading(View::Clusters));
    assert_eq!(app.active_task_count(), 2);

    settle(&mut app).await;

    assert!(!app.is_loading(View::Clusters));
    assert_eq!(app.item_count(View::Clusters), 3);
    assert_eq!(app.state().overview.as_ref().map(|o| o.account_count), Some(2));

    // Other views wait until they are opened
    let calls = backend.calls();
    assert!(calls.contains(&"clusters:1".to_string()));
    assert!(!calls.contains(&"accounts:1".to_string()));
}

#[tokio::test]
async fn test_stale_results_are_dropped() {
    let mut app = app_with(inventory(), Config::default());
    app.start();
    settle(&mut app).await;

    app.handle_app_action(Action::ClustersLoaded {
        epoch: 0,
        clusters: Vec::new(),
    });
    assert_eq!(app.item_count(View::Clusters), 3);

    app.handle_app_action(Action::LoadFailed {
        view: View::Clusters,
        epoch: 0,
        message: "late".to_string(),
    });
    assert!(app.state().error_message.is_none());
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_rows() {
    let mut app = app_with(inventory(), Config::default());
    app.start();
    settle(&mut app).await;

    app.handle_app_action(Action::LoadFailed {
        view: View::Clusters,
        epoch: 1,
        message: "HTTP 502: bad gateway".to_string(),
    });

    assert_eq!(app.item_count(View::Clusters), 3);
    assert!(!app.is_loading(View::Clusters));
    assert!(app
        .state()
        .error_message
        .as_deref()
        .is_some_and(|m| m.contains("bad gateway")));
}

#[tokio::test]
async fn test_views_load_once_until_reloaded() {
    let backend = inventory();
    let mut app = app_with(backend.clone(), Config::default());
    app.start();
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('4'));
    assert_eq!(app.current_view(), View::Schedules);
    settle(&mut app).await;
    assert_eq!(app.item_count(View::Schedules), 2);

    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Char('4'));
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('r'));
    settle(&mut app).await;

    let action_loads = backend.calls().iter().filter(|c| *c == "actions:1").count();
    assert_eq!(action_loads, 2);
}

#[tokio::test]
async fn test_disable_reloads_schedules() {
    let backend = inventory();
    let mut app = app_with(backend.clone(), Config::default());
    app.start();
    press(&mut app, KeyCode::Char('4'));
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('d'));
    assert!(app.is_loading(View::Schedules));
    settle(&mut app).await;

    assert_eq!(app.state().info_message.as_deref(), Some(SUCCESS_ACTION_DISABLED));
    assert!(backend.calls().contains(&"disable:x1".to_string()));
    assert!(!backend.actions.lock().unwrap()[0].enabled);
    assert!(!app.is_loading(View::Schedules));
}

#[tokio::test]
async fn test_delete_asks_first() {
    let backend = inventory();
    let mut app = app_with(backend.clone(), Config::default());
    app.start();
    press(&mut app, KeyCode::Char('4'));
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('x'));
    assert!(app.dialog().is_visible());

    press(&mut app, KeyCode::Char('y'));
    settle(&mut app).await;

    assert!(!app.dialog().is_visible());
    assert_eq!(app.item_count(View::Schedules), 1);
    assert!(backend.calls().contains(&"delete:x1".to_string()));
}

#[tokio::test]
async fn test_row_action_without_rows() {
    let mut app = app_with(Arc::new(FakeBackend::new()), Config::default());
    app.start();
    press(&mut app, KeyCode::Char('4'));
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('e'));

    assert_eq!(app.state().error_message.as_deref(), Some(ERROR_NO_ACTION_SELECTED));
}

#[tokio::test]
async fn test_failed_row_action_clears_loading() {
    let backend = Arc::new(FakeBackend {
        actions: Mutex::new(vec![cron_action("x1", "c1"), cron_action("x2", "c2")]),
        fail_writes: true,
        ..Default::default()
    });
    let mut app = app_with(backend, Config::default());
    app.start();
    press(&mut app, KeyCode::Char('4'));
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('e'));
    assert!(app.is_loading(View::Schedules));
    settle(&mut app).await;

    assert!(!app.is_loading(View::Schedules));
    assert_eq!(app.item_count(View::Schedules), 2);
    let error = app.state().error_message.clone().unwrap_or_default();
    assert!(error.starts_with(ERROR_ACTION_UPDATE_FAILED), "{error}");
    assert!(error.contains("x1"));
}

#[tokio::test]
async fn test_applied_row_action_with_failed_reload() {
    let backend = inventory();
    let mut app = app_with(backend.clone(), Config::default());
    app.start();
    press(&mut app, KeyCode::Char('4'));
    settle(&mut app).await;

    // The write succeeds, only the refresh afterwards breaks
    backend.fail_action_list.store(true, Ordering::SeqCst);
    press(&mut app, KeyCode::Char('d'));
    settle(&mut app).await;

    assert!(backend.calls().contains(&"disable:x1".to_string()));
    assert!(!app.is_loading(View::Schedules));
    assert_eq!(app.item_count(View::Schedules), 2);
    let error = app.state().error_message.clone().unwrap_or_default();
    assert!(error.starts_with(ERROR_LOAD_FAILED), "{error}");
    assert!(!error.contains(ERROR_ACTION_UPDATE_FAILED));
}

#[tokio::test]
async fn test_schedule_dialog_loads_accounts() {
    let mut app = app_with(inventory(), Config::default());
    app.start();
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('a'));
    assert!(app.schedule_dialog().is_open());
    settle(&mut app).await;

    assert_eq!(app.schedule_dialog().form().accounts().len(), 2);

    // Keys belong to the dialog while it is open
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit());

    press(&mut app, KeyCode::Esc);
    assert!(!app.schedule_dialog().is_open());
}

#[tokio::test]
async fn test_quit_keys() {
    let mut app = app_with(inventory(), Config::default());
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());

    let mut app = app_with(inventory(), Config::default());
    press(&mut app, KeyCode::Char('?'));
    assert!(app.dialog().is_visible());
    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
        .unwrap();
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_search_applies_after_debounce() {
    let mut config = Config::default();
    config.ui.search_debounce_ms = 20;
    let mut app = app_with(inventory(), config);
    app.start();
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "c2");

    // Keystrokes alone do not filter
    assert!(screen(&mut app).contains("cluster-c1"));

    tokio::time::sleep(Duration::from_millis(60)).await;
    settle(&mut app).await;

    let text = screen(&mut app);
    assert!(text.contains("cluster-c2"));
    assert!(!text.contains("cluster-c1"));
}

#[tokio::test]
async fn test_enter_commits_search_at_once() {
    let mut app = app_with(inventory(), Config::default());
    app.start();
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "c3");
    press(&mut app, KeyCode::Enter);

    let text = screen(&mut app);
    assert!(text.contains("cluster-c3"));
    assert!(!text.contains("cluster-c2"));

    // Typing 'q' while searching did not quit
    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit());
}

#[tokio::test]
async fn test_render_shows_tabs_and_rows() {
    let mut app = app_with(inventory(), Config::default());
    app.start();
    settle(&mut app).await;

    let text = screen(&mut app);
    assert!(text.contains("Clusters"));
    assert!(text.contains("Schedules"));
    assert!(text.contains("cluster-c1"));
}
