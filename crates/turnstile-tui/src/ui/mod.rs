//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod dashboard;
mod input;
mod login;
mod report;
mod status;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use turnstile_app::Screen;

use crate::App;

const TITLE: &str = "TURNSTILE SECURE LOGIN";
const SUBTITLE: &str = "Protected with Rate Limiting & Security Logging";

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const HEADER_HEIGHT: u16 = 4;
    const BODY_MIN_HEIGHT: u16 = 5;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, body_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_header(frame, app, *header_area);
    render_body(frame, app, *body_area);
    input::render(frame, app, *input_area);
    status::render(frame, app, *status_area);
}

/// Render the title block.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let subtitle = app.user().map_or_else(
        || SUBTITLE.to_string(),
        |user| format!("Logged in as: {user}"),
    );

    let lines = vec![
        Line::styled(TITLE, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Line::styled(subtitle, Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Render the screen-specific body.
fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    match app.screen() {
        Screen::Login(_) => login::render(frame, app, area),
        Screen::SwitchAccount => login::render_switch_account(frame, area),
        Screen::Dashboard => dashboard::render(frame, app, area),
        Screen::Status(status) => report::render_status(frame, status, area),
        Screen::Logs(view) => report::render_logs(frame, view, area),
        Screen::Unblock(blocked) => report::render_blocked(frame, blocked, area),
        Screen::SystemInfo(info) => report::render_system_info(frame, info, area),
    }
}
