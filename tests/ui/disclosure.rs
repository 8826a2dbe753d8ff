use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nimbus::ui::components::disclosure::{MenuOutcome, Selection};
use nimbus::ui::components::{Disclosure, FilterMenu};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn options() -> Vec<String> {
    vec!["Running".to_string(), "Stopped".to_string(), "Terminated".to_string()]
}

#[test]
fn test_disclosure_open_close() {
    let mut disclosure = Disclosure::new();
    assert!(!disclosure.is_open());

    disclosure.toggle();
    assert!(disclosure.is_open());

    disclosure.outside_interaction();
    assert!(!disclosure.is_open());

    disclosure.open();
    disclosure.close();
    assert!(!disclosure.is_open());
}

#[test]
fn test_single_choice_menu() {
    let mut menu = FilterMenu::new("Status", options(), Selection::Single);
    assert_eq!(menu.summary(), "Status: All");

    menu.open();
    assert_eq!(menu.handle_key(key(KeyCode::Down)), MenuOutcome::Handled);
    assert_eq!(menu.handle_key(key(KeyCode::Enter)), MenuOutcome::Changed);

    assert_eq!(menu.value(), Some("Stopped"));
    assert_eq!(menu.summary(), "Status: Stopped");
    // Choosing in a single-choice menu closes it
    assert!(!menu.is_open());

    // Choosing the same value again clears it
    menu.open();
    menu.handle_key(key(KeyCode::Enter));
    assert_eq!(menu.value(), None);
}

#[test]
fn test_multiple_choice_menu_stays_open() {
    let mut menu = FilterMenu::new("Provider", options(), Selection::Multiple);
    menu.open();

    menu.handle_key(key(KeyCode::Char(' ')));
    menu.handle_key(key(KeyCode::Char('j')));
    menu.handle_key(key(KeyCode::Char('j')));
    menu.handle_key(key(KeyCode::Enter));

    assert_eq!(menu.chosen(), &["Running".to_string(), "Terminated".to_string()]);
    assert_eq!(menu.summary(), "Provider: Running, Terminated");
    assert!(menu.is_open());

    menu.handle_key(key(KeyCode::Char('k')));
    menu.handle_key(key(KeyCode::Char('k')));
    menu.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(menu.chosen(), &["Terminated".to_string()]);
}

#[test]
fn test_cursor_stays_in_bounds() {
    let mut menu = FilterMenu::new("Status", options(), Selection::Single);
    menu.open();

    menu.handle_key(key(KeyCode::Up));
    assert_eq!(menu.cursor(), 0);

    for _ in 0..10 {
        menu.handle_key(key(KeyCode::Down));
    }
    assert_eq!(menu.cursor(), 2);
}

#[test]
fn test_outside_key_closes_menu() {
    let mut menu = FilterMenu::new("Status", options(), Selection::Single);
    menu.open();

    assert_eq!(menu.handle_key(key(KeyCode::Char('/'))), MenuOutcome::Closed);
    assert!(!menu.is_open());
}

#[test]
fn test_escape_closes_without_change() {
    let mut menu = FilterMenu::new("Status", options(), Selection::Single);
    menu.open();

    assert_eq!(menu.handle_key(key(KeyCode::Esc)), MenuOutcome::Handled);
    assert!(!menu.is_open());
    assert!(menu.chosen().is_empty());
}
