//! Status bar
//!
//! Displays feedback for the last operation and operator alerts.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use turnstile_app::NoticeLevel;

use crate::App;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];

    if let Some(notice) = app.notice() {
        let style = match notice.level {
            NoticeLevel::Info => Style::default().fg(Color::White),
            NoticeLevel::Success => Style::default().fg(Color::Green),
            NoticeLevel::Warning => Style::default().fg(Color::Yellow),
            NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        spans.push(Span::styled(notice.text.clone(), style));
    }

    if let Some(alert) = app.alert() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("[ERROR] {alert}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let paragraph = Paragraph::new(Line::from(spans)).style(style);

    frame.render_widget(paragraph, area);
}
