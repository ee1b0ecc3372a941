//! Report screens
//!
//! Security status, recent audit lines, the blocked list for unblocking,
//! and system information.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use turnstile_app::{LOG_VIEW_LIMIT, LogView};
use turnstile_core::{BlockedUser, SecurityStatus, SystemInfo, format_timestamp};

const BORDER_SIZE: u16 = 2;
const NEAR_THRESHOLD_MARKER: &str = "!";
const NO_MARKER: &str = " ";

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::styled(text.into(), Style::default().add_modifier(Modifier::BOLD))
}

fn render_block(frame: &mut Frame, title: &str, lines: Vec<Line<'_>>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" {title} "));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the security status report.
pub fn render_status(frame: &mut Frame, status: &SecurityStatus, area: Rect) {
    let mut lines = vec![
        Line::from(format!("Generated: {}", format_timestamp(status.generated_at))),
        Line::from(format!("Max Failed Attempts: {}", status.max_attempts)),
        Line::default(),
    ];

    if status.blocked.is_empty() {
        lines.push(Line::styled("No blocked users", Style::default().fg(Color::Green)));
    } else {
        lines.push(Line::styled(
            format!("Blocked Users ({}):", status.blocked.len()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        lines.extend(status.blocked.iter().map(|user| {
            Line::from(format!(
                "   - {} (Failed attempts: {})",
                user.username, user.failed_attempts
            ))
        }));
    }

    lines.push(Line::default());

    if status.pending.is_empty() {
        lines.push(Line::styled("No recent failed attempts", Style::default().fg(Color::Green)));
    } else {
        lines.push(heading("Users with Failed Attempts:"));
        lines.extend(status.pending.iter().map(|user| {
            let (marker, style) = if user.near_threshold {
                (NEAR_THRESHOLD_MARKER, Style::default().fg(Color::Yellow))
            } else {
                (NO_MARKER, Style::default())
            };
            Line::from(vec![
                Span::styled(format!("   {marker} "), style),
                Span::styled(
                    format!(
                        "{}: {}/{} attempts",
                        user.username, user.failed_attempts, status.max_attempts
                    ),
                    style,
                ),
            ])
        }));
    }

    render_block(frame, "Security Status Report", lines, area);
}

/// Render the tail of the audit log.
///
/// Shows as many of the most recent lines as fit, followed by the count.
pub fn render_logs(frame: &mut Frame, view: &LogView, area: Rect) {
    let title = format!("Security Logs (Last {LOG_VIEW_LIMIT})");

    let lines = match view {
        LogView::Missing => {
            vec![Line::styled("No log file found yet.", Style::default().fg(Color::Red))]
        },
        LogView::Entries { total: 0, .. } => vec![Line::from("No log entries found.")],
        LogView::Entries { recent, total } => {
            let footer = Line::styled(
                format!("Showing {} of {total} total entries", recent.len()),
                Style::default().fg(Color::DarkGray),
            );

            let visible_height = area.height.saturating_sub(BORDER_SIZE + 1) as usize;
            let skip = recent.len().saturating_sub(visible_height);

            let mut lines: Vec<Line> =
                recent.iter().skip(skip).map(|entry| Line::from(entry.as_str())).collect();
            lines.push(footer);
            lines
        },
    };

    render_block(frame, &title, lines, area);
}

/// Render the blocked list above the unblock prompt.
pub fn render_blocked(frame: &mut Frame, blocked: &[BlockedUser], area: Rect) {
    let mut lines = vec![Line::styled(
        format!("Currently Blocked Users ({}):", blocked.len()),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )];

    lines.extend(blocked.iter().enumerate().map(|(i, user)| {
        Line::from(format!(
            "  {}. {} - Failed attempts: {}",
            i.saturating_add(1),
            user.username,
            user.failed_attempts
        ))
    }));

    lines.push(Line::default());
    lines.push(Line::styled(
        "Enter a username to unblock, or an empty line to cancel.",
        Style::default().fg(Color::DarkGray),
    ));

    render_block(frame, "Unblock User", lines, area);
}

/// Render system information.
pub fn render_system_info(frame: &mut Frame, info: &SystemInfo, area: Rect) {
    let lines = vec![
        Line::from(format!("Max Failed Attempts: {}", info.max_attempts)),
        Line::from(format!("Log File: {}", info.log_location)),
        Line::from(format!("Registered Users: {}", info.registered_users)),
        Line::from(format!("Blocked Users: {}", info.blocked_users)),
        Line::from(format!("Active Failed Attempts: {}", info.active_failed_attempts)),
    ];

    render_block(frame, "System Information", lines, area);
}
