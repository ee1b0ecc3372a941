//! Fuzz target for the console state machine
//!
//! Random keystrokes are fed to the App with a real bridge behind it, and
//! every action is executed the way the runtime would.
//!
//! # Invariants
//!
//! - Session invariants hold after every key
//! - A logged-in user is never blocked
//! - Quit only ever comes from the login flow or Ctrl-C
//! - NEVER panic on any key sequence

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use turnstile_app::{App, AppAction, AppEvent, GuardBridge, KeyInput, Screen};
use turnstile_core::{CredentialStore, LoginGuard, MemoryAuditLog};
use turnstile_harness::{InvariantRegistry, SimClock, SystemSnapshot};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum FuzzKey {
    Char(u8),
    Enter,
    Backspace,
    Delete,
    Esc,
    Left,
    Right,
    Home,
    End,
    Resize(u16, u16),
}

impl FuzzKey {
    fn event(self) -> AppEvent {
        const ALPHABET: &[u8] = b"adminpsword123utery ";
        let key = match self {
            Self::Char(b) => KeyInput::Char(char::from(ALPHABET[usize::from(b) % ALPHABET.len()])),
            Self::Enter => KeyInput::Enter,
            Self::Backspace => KeyInput::Backspace,
            Self::Delete => KeyInput::Delete,
            Self::Esc => KeyInput::Esc,
            Self::Left => KeyInput::Left,
            Self::Right => KeyInput::Right,
            Self::Home => KeyInput::Home,
            Self::End => KeyInput::End,
            Self::Resize(cols, rows) => return AppEvent::Resize(cols, rows),
        };
        AppEvent::Key(key)
    }
}

fuzz_target!(|keys: Vec<FuzzKey>| {
    let guard =
        LoginGuard::new(2, CredentialStore::demo(), MemoryAuditLog::new(), SimClock::epoch())
            .expect("threshold is positive");
    let mut bridge = GuardBridge::new(guard);
    let mut app = App::default();
    let registry = InvariantRegistry::standard();

    for key in keys {
        let screen_before = app.screen().clone();
        let mut pending = app.handle(key.event());

        while !pending.is_empty() {
            for action in std::mem::take(&mut pending) {
                match action {
                    AppAction::Render => {},
                    AppAction::Quit { .. } => {
                        assert!(matches!(screen_before, Screen::Login(_) | Screen::SwitchAccount));
                        return;
                    },
                    other => {
                        for event in bridge.process_app_action(other) {
                            pending.extend(app.handle(event));
                        }
                    },
                }
            }
        }

        registry.assert_all(&SystemSnapshot::capture(&app, bridge.guard()), "after key");
    }
});
