//! Input line
//!
//! Displays the prompt for the current screen and the editor buffer with
//! cursor. Secrets are drawn masked.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use turnstile_app::{LoginStage, Screen};

use crate::App;

const MASK_CHAR: char = '*';
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const LEFT_BORDER: u16 = 1;
const RIGHT_PADDING: u16 = 1; // inside right border

/// Prompt for screens with a line editor. `None` for key-driven screens.
fn prompt(screen: &Screen) -> Option<&'static str> {
    match screen {
        Screen::Login(LoginStage::Username) => Some("Username: "),
        Screen::Login(LoginStage::Password { .. }) => Some("Password: "),
        Screen::Unblock(_) => Some("Unblock: "),
        Screen::SwitchAccount => Some("Login with different account? (yes/no): "),
        Screen::Dashboard | Screen::Status(_) | Screen::Logs(_) | Screen::SystemInfo(_) => None,
    }
}

/// Key hint for screens without a line editor.
fn hint(screen: &Screen) -> &'static str {
    match screen {
        Screen::Dashboard => "Select (1-5)",
        _ => "Press Enter to continue",
    }
}

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    let Some(prompt) = prompt(app.screen()) else {
        let paragraph = Paragraph::new(hint(app.screen()))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let editor = app.editor();
    let shown = if app.input_masked() {
        MASK_CHAR.to_string().repeat(editor.len())
    } else {
        editor.buffer().to_string()
    };

    let paragraph = Paragraph::new(format!("{prompt}{shown}"))
        .style(Style::default().fg(Color::White))
        .block(block);
    frame.render_widget(paragraph, area);

    let prompt_width = prompt.chars().count() as u16;
    let cursor_x = area
        .x
        .saturating_add(LEFT_BORDER)
        .saturating_add(prompt_width)
        .saturating_add(editor.cursor() as u16);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING + 1);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
