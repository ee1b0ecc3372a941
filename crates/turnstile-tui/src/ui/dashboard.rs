//! Dashboard menu

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const MENU: [(char, &str); 5] = [
    ('1', "View Security Status"),
    ('2', "View Security Logs"),
    ('3', "Unblock User"),
    ('4', "System Info"),
    ('5', "Logout"),
];

/// Render the main menu.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let user = app.user().unwrap_or("-");

    let user_style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::raw("Logged in as: "),
        Span::styled(user.to_string(), user_style),
    ])];
    if let Some(now) = app.clock() {
        lines.push(Line::from(format!("Time: {now}")));
    }
    lines.push(Line::default());
    lines.push(Line::styled("MAIN MENU", Style::default().add_modifier(Modifier::BOLD)));

    lines.extend(MENU.iter().map(|(key, label)| {
        Line::from(vec![
            Span::styled(format!("{key}."), Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {label}")),
        ])
    }));

    let block = Block::default().borders(Borders::ALL).title(" Dashboard ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
