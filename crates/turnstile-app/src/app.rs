//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the login console completely decoupled from I/O and from the
//! guard itself.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Screens
//!
//! ```text
//! Login(Username) -> Login(Password) --granted--> Dashboard
//! Dashboard --1--> Status     --Enter/Esc--> Dashboard
//!           --2--> Logs       --Enter/Esc--> Dashboard
//!           --3--> Unblock    --Enter/Esc--> Dashboard
//!           --4--> SystemInfo --Enter/Esc--> Dashboard
//!           --5--> SwitchAccount --yes--> Login(Username)
//!                                --else--> quit
//! ```
//!
//! Ctrl-C quits from any screen.

use turnstile_core::AuthOutcome;

use crate::{
    AppAction, AppEvent, KeyInput, LineEditor, LogView, LoginStage, Notice, Screen,
    ShutdownReason,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Current screen.
    screen: Screen,
    /// Text input shared by every screen that takes a line.
    editor: LineEditor,
    /// Logged-in username. `None` before login and after logout.
    user: Option<String>,
    /// Account hints shown on the login screen (`"user / secret"`).
    account_hints: Vec<String>,
    /// Feedback for the last operation. `None` if nothing to show.
    notice: Option<Notice>,
    /// Operator alert (audit write failures). `None` if no alert.
    alert: Option<String>,
    /// Wall-clock time shown on the dashboard.
    clock: Option<String>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl Default for App {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl App {
    /// Create an App on the login screen.
    ///
    /// `account_hints` are listed on the login screen; pass an empty vector
    /// to hide them.
    pub fn new(account_hints: Vec<String>) -> Self {
        Self {
            screen: Screen::Login(LoginStage::Username),
            editor: LineEditor::new(),
            user: None,
            account_hints,
            notice: None,
            alert: None,
            clock: None,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::ClockUpdated(now) => {
                if self.clock.as_deref() == Some(now.as_str()) {
                    return vec![];
                }
                self.clock = Some(now);
                if self.screen == Screen::Dashboard {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::AuthCompleted { username, outcome } => self.auth_completed(username, outcome),
            AppEvent::StatusReady(status) => self.show(Screen::Status(status)),
            AppEvent::LogsLoaded(view) => self.show(Screen::Logs(view)),
            AppEvent::BlockedListLoaded(blocked) => {
                if blocked.is_empty() {
                    self.notice = Some(Notice::success("No users are currently blocked."));
                    self.show(Screen::Dashboard)
                } else {
                    self.show(Screen::Unblock(blocked))
                }
            },
            AppEvent::SystemInfoLoaded(info) => self.show(Screen::SystemInfo(info)),
            AppEvent::UserUnblocked { username } => {
                self.notice = Some(Notice::success(format!(
                    "User '{username}' has been unblocked successfully! Failed attempt counter \
                     reset."
                )));
                self.show(Screen::Dashboard)
            },
            AppEvent::UnblockIgnored { username } => {
                self.notice =
                    Some(Notice::error(format!("User '{username}' is not in the blocked list.")));
                self.show(Screen::Dashboard)
            },
            AppEvent::LoggedOut { username } => {
                tracing::debug!(%username, "session ended");
                self.user = None;
                self.notice = Some(Notice::info("Logging out..."));
                self.show(Screen::SwitchAccount)
            },
            AppEvent::Error { message } => {
                self.alert = Some(message);
                vec![AppAction::Render]
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if key == KeyInput::Interrupt {
            return vec![AppAction::Quit { reason: ShutdownReason::Interrupted }];
        }

        match self.screen {
            Screen::Login(_) | Screen::Unblock(_) | Screen::SwitchAccount => {
                if self.editor.apply(key) {
                    return vec![AppAction::Render];
                }
                match key {
                    KeyInput::Enter => self.submit_line(),
                    KeyInput::Esc => self.escape(),
                    _ => vec![],
                }
            },
            Screen::Dashboard => match key {
                KeyInput::Char(choice) => self.menu(choice),
                _ => vec![],
            },
            Screen::Status(_) | Screen::Logs(_) | Screen::SystemInfo(_) => match key {
                KeyInput::Enter | KeyInput::Esc => {
                    self.notice = None;
                    self.show(Screen::Dashboard)
                },
                _ => vec![],
            },
        }
    }

    /// Enter on a screen with a line editor.
    fn submit_line(&mut self) -> Vec<AppAction> {
        let line = self.editor.take();
        let line = line.trim();

        match &self.screen {
            Screen::Login(LoginStage::Username) => {
                if line.is_empty() {
                    self.notice = Some(Notice::error("Username cannot be empty."));
                    return vec![AppAction::Render];
                }
                self.notice = None;
                self.show(Screen::Login(LoginStage::Password { username: line.to_owned() }))
            },
            Screen::Login(LoginStage::Password { username }) => {
                let username = username.clone();
                if line.is_empty() {
                    self.notice = Some(Notice::error("Password cannot be empty."));
                    return self.show(Screen::Login(LoginStage::Username));
                }
                self.notice = Some(Notice::info("Authenticating..."));
                vec![
                    AppAction::Authenticate { username, secret: line.to_owned() },
                    AppAction::Render,
                ]
            },
            Screen::Unblock(_) => {
                if line.is_empty() {
                    self.notice = Some(Notice::info("Cancelled."));
                    return self.show(Screen::Dashboard);
                }
                vec![AppAction::Unblock { username: line.to_owned() }, AppAction::Render]
            },
            Screen::SwitchAccount => {
                if line.eq_ignore_ascii_case("yes") {
                    self.notice = None;
                    self.show(Screen::Login(LoginStage::Username))
                } else {
                    vec![AppAction::Quit { reason: ShutdownReason::Normal }]
                }
            },
            Screen::Dashboard | Screen::Status(_) | Screen::Logs(_) | Screen::SystemInfo(_) => {
                vec![]
            },
        }
    }

    /// Esc on a screen with a line editor.
    fn escape(&mut self) -> Vec<AppAction> {
        match self.screen {
            Screen::Login(_) | Screen::SwitchAccount => {
                vec![AppAction::Quit { reason: ShutdownReason::Normal }]
            },
            Screen::Unblock(_) => {
                self.editor.clear();
                self.notice = Some(Notice::info("Cancelled."));
                self.show(Screen::Dashboard)
            },
            Screen::Dashboard | Screen::Status(_) | Screen::Logs(_) | Screen::SystemInfo(_) => {
                vec![]
            },
        }
    }

    /// Dashboard menu selection.
    fn menu(&mut self, choice: char) -> Vec<AppAction> {
        self.notice = None;
        let action = match choice {
            '1' => AppAction::ShowStatus,
            '2' => AppAction::LoadLogs,
            '3' => AppAction::LoadBlockedUsers,
            '4' => AppAction::ShowSystemInfo,
            '5' => match self.user.clone() {
                Some(username) => AppAction::Logout { username },
                None => return self.show(Screen::Login(LoginStage::Username)),
            },
            _ => {
                self.notice = Some(Notice::error("Invalid choice!"));
                return vec![AppAction::Render];
            },
        };
        vec![action, AppAction::Render]
    }

    fn auth_completed(&mut self, username: String, outcome: AuthOutcome) -> Vec<AppAction> {
        match outcome {
            AuthOutcome::Granted => {
                self.notice =
                    Some(Notice::success(format!("Login successful! Welcome, {username}!")));
                self.user = Some(username);
                self.show(Screen::Dashboard)
            },
            AuthOutcome::Denied { remaining, .. } => {
                self.notice = Some(Notice::warning(format!(
                    "Invalid username or password. Warning: {remaining} attempt(s) remaining \
                     before lockout."
                )));
                self.show(Screen::Login(LoginStage::Username))
            },
            AuthOutcome::LockedOut { .. } => {
                self.notice = Some(Notice::error(format!(
                    "Invalid username or password. User '{username}' is temporarily blocked due \
                     to too many failed attempts."
                )));
                self.show(Screen::Login(LoginStage::Username))
            },
            AuthOutcome::Blocked => {
                self.notice = Some(Notice::error(format!(
                    "User '{username}' is temporarily blocked due to too many failed attempts."
                )));
                self.show(Screen::Login(LoginStage::Username))
            },
        }
    }

    /// Switch screens. Any error banner is dropped.
    fn show(&mut self, screen: Screen) -> Vec<AppAction> {
        self.screen = screen;
        self.alert = None;
        vec![AppAction::Render]
    }

    /// Current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Line editor for the current screen.
    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    /// Whether the editor holds a secret and must be drawn masked.
    pub fn input_masked(&self) -> bool {
        matches!(self.screen, Screen::Login(LoginStage::Password { .. }))
    }

    /// Logged-in username. `None` if nobody is logged in.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Account hints for the login screen.
    pub fn account_hints(&self) -> &[String] {
        &self.account_hints
    }

    /// Feedback for the last operation. `None` if nothing to show.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Operator alert. `None` if no alert.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Last wall-clock time received. `None` before the first update.
    pub fn clock(&self) -> Option<&str> {
        self.clock.as_deref()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Whether the current screen is the log view with a missing log file.
    pub fn log_missing(&self) -> bool {
        matches!(self.screen, Screen::Logs(LogView::Missing))
    }
}
