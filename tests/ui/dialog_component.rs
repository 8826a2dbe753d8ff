use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nimbus::logger::Logger;
use nimbus::models::Operation;
use nimbus::service::actions::RowAction;
use nimbus::ui::components::DialogComponent;
use nimbus::ui::core::{actions::DialogType, Action, Component};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn confirm_power() -> DialogComponent {
    let mut dialog = DialogComponent::new(Logger::new());
    let action = dialog.update(Action::ShowDialog(DialogType::ConfirmPower {
        cluster_id: "c1".to_string(),
        cluster_name: "payments".to_string(),
        operation: Operation::PowerOff,
    }));
    assert!(matches!(action, Action::None));
    dialog
}

#[test]
fn test_confirming_power_emits_the_operation() {
    let mut dialog = confirm_power();
    assert!(dialog.is_visible());

    let action = dialog.handle_key_events(key(KeyCode::Char('y')));

    assert!(matches!(
        action,
        Action::PowerCluster { ref cluster_id, operation: Operation::PowerOff } if cluster_id == "c1"
    ));
    assert!(!dialog.is_visible());
}

#[test]
fn test_declining_hides() {
    let mut dialog = confirm_power();

    let action = dialog.handle_key_events(key(KeyCode::Char('n')));
    assert!(matches!(action, Action::HideDialog));

    dialog.update(action);
    assert!(!dialog.is_visible());
}

#[test]
fn test_confirming_delete() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.update(Action::ShowDialog(DialogType::ConfirmDelete {
        action_id: "x1".to_string(),
    }));

    let action = dialog.handle_key_events(key(KeyCode::Enter));

    assert!(matches!(
        action,
        Action::ApplyRowAction { ref action_id, row_action: RowAction::Delete } if action_id == "x1"
    ));
}

#[test]
fn test_schedule_dialog_is_not_hosted() {
    let mut dialog = DialogComponent::new(Logger::new());
    let action = dialog.update(Action::ShowDialog(DialogType::Schedule));

    assert!(matches!(action, Action::ShowDialog(DialogType::Schedule)));
    assert!(!dialog.is_visible());
}

#[test]
fn test_help_scrolls_and_closes() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.update(Action::ShowDialog(DialogType::Help));

    dialog.handle_key_events(key(KeyCode::Down));
    dialog.handle_key_events(key(KeyCode::Down));
    assert_eq!(dialog.scroll_offset, 2);

    dialog.handle_key_events(key(KeyCode::Home));
    assert_eq!(dialog.scroll_offset, 0);

    assert!(matches!(dialog.handle_key_events(key(KeyCode::Char('?'))), Action::HideDialog));
}

#[test]
fn test_reopening_resets_scroll() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.update(Action::ShowDialog(DialogType::Logs));
    dialog.handle_key_events(key(KeyCode::PageDown));
    assert_eq!(dialog.scroll_offset, 10);

    dialog.update(Action::ShowDialog(DialogType::Help));
    assert_eq!(dialog.scroll_offset, 0);
}

#[test]
fn test_unrelated_actions_pass_through() {
    let mut dialog = DialogComponent::new(Logger::new());
    assert!(matches!(dialog.update(Action::NextView), Action::NextView));
}
