//! Login screen
//!
//! Credential prompt with optional account hints, and the post-logout
//! prompt.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use turnstile_app::{LoginStage, Screen};

use crate::App;

const HINT_BULLET: &str = "  • ";

/// Render the login form body.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let step = match app.screen() {
        Screen::Login(LoginStage::Password { username }) => format!("Password for {username}"),
        _ => "Username".to_string(),
    };

    let mut lines = vec![
        Line::styled(
            "Please enter your credentials",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(format!("Step: {step}"), Style::default().fg(Color::DarkGray)),
        Line::default(),
    ];

    if !app.account_hints().is_empty() {
        lines.push(Line::from("Available test accounts:"));
        lines.extend(
            app.account_hints()
                .iter()
                .map(|hint| {
                    Line::styled(format!("{HINT_BULLET}{hint}"), Style::default().fg(Color::Cyan))
                }),
        );
    }

    let block = Block::default().borders(Borders::ALL).title(" Login ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the "login with different account" prompt.
pub fn render_switch_account(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("You have been logged out."),
        Line::default(),
        Line::from("Type yes to log in with a different account."),
        Line::styled("Anything else exits.", Style::default().fg(Color::DarkGray)),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Logout ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
