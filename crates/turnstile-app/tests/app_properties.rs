//! Property-based tests for App state machine.
//!
//! Random keystrokes are driven through the App and a real bridge. The
//! session invariants must hold after every key.

use chrono::NaiveDate;
use proptest::prelude::*;
use turnstile_app::{App, AppAction, AppEvent, GuardBridge, KeyInput, LoginStage, Screen};
use turnstile_core::{CredentialStore, FixedClock, LoginGuard, MemoryAuditLog};

/// Generate keystrokes biased towards the characters the screens react to.
fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        6 => prop::sample::select("admin12345 yes".chars().collect::<Vec<_>>())
            .prop_map(KeyInput::Char),
        3 => Just(KeyInput::Enter),
        1 => Just(KeyInput::Backspace),
        1 => Just(KeyInput::Delete),
        1 => Just(KeyInput::Left),
        1 => Just(KeyInput::Right),
        1 => Just(KeyInput::Home),
        1 => Just(KeyInput::End),
        1 => Just(KeyInput::Up),
    ]
}

fn bridge() -> GuardBridge<MemoryAuditLog, FixedClock> {
    let clock = FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)).expect("date"),
    );
    let credentials = CredentialStore::new([("admin", "admin"), ("user", "userpass")]);
    let guard = LoginGuard::new(3, credentials, MemoryAuditLog::new(), clock).expect("threshold");
    GuardBridge::new(guard)
}

/// Run actions through the bridge until only Render/Quit remain.
///
/// Returns `true` if the App asked to quit.
fn process(
    app: &mut App,
    bridge: &mut GuardBridge<MemoryAuditLog, FixedClock>,
    actions: Vec<AppAction>,
) -> bool {
    let mut pending = actions;
    while !pending.is_empty() {
        for action in std::mem::take(&mut pending) {
            match action {
                AppAction::Render => {},
                AppAction::Quit { .. } => return true,
                other => {
                    for event in bridge.process_app_action(other) {
                        pending.extend(app.handle(event));
                    }
                },
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn prop_session_invariants_hold(keys in prop::collection::vec(key_strategy(), 0..120)) {
        let mut app = App::default();
        let mut bridge = bridge();

        for key in keys {
            let actions = app.handle(AppEvent::Key(key));
            if process(&mut app, &mut bridge, actions) {
                prop_assert_eq!(app.screen(), &Screen::SwitchAccount);
                break;
            }

            prop_assert!(app.editor().cursor() <= app.editor().len());
            prop_assert_eq!(
                app.input_masked(),
                matches!(app.screen(), Screen::Login(LoginStage::Password { .. }))
            );

            let on_login_flow = matches!(app.screen(), Screen::Login(_) | Screen::SwitchAccount);
            prop_assert_eq!(app.user().is_none(), on_login_flow);

            if let Some(user) = app.user() {
                prop_assert!(!bridge.guard().is_blocked(user));
            }
        }
    }

    #[test]
    fn prop_interrupt_always_quits(keys in prop::collection::vec(key_strategy(), 0..60)) {
        let mut app = App::default();
        let mut bridge = bridge();

        for key in keys {
            let actions = app.handle(AppEvent::Key(key));
            if process(&mut app, &mut bridge, actions) {
                return Ok(());
            }
        }

        let actions = app.handle(AppEvent::Key(KeyInput::Interrupt));
        let quits = matches!(actions.as_slice(), [AppAction::Quit { .. }]);
        prop_assert!(quits, "Ctrl-C did not quit: {:?}", actions);
    }
}

#[test]
fn blocked_user_never_reaches_dashboard() {
    let mut app = App::default();
    let mut bridge = bridge();

    let mut submit = |app: &mut App, text: &str| {
        for c in text.chars() {
            app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        let actions = app.handle(AppEvent::Key(KeyInput::Enter));
        process(app, &mut bridge, actions);
    };

    for _ in 0..3 {
        submit(&mut app, "user");
        submit(&mut app, "nope");
    }
    submit(&mut app, "user");
    submit(&mut app, "userpass");

    assert_eq!(app.screen(), &Screen::Login(LoginStage::Username));
    assert_eq!(app.user(), None);
    assert!(app.notice().is_some_and(|n| n.text.contains("temporarily blocked")));
}
