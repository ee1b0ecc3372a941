//! Terminal-agnostic keyboard input and the single-line editor.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Escape key (back, or quit from the login screen).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
    /// Ctrl-C.
    Interrupt,
}

/// Single-line text editor.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    /// Text buffer for user input.
    buffer: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Apply an editing key.
    ///
    /// Returns `false` for keys that do not edit text (Enter, Esc, Up, Down,
    /// Interrupt), leaving the buffer untouched.
    pub fn apply(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => {
                if self.cursor < self.len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
            },
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.len(),
            KeyInput::Enter
            | KeyInput::Esc
            | KeyInput::Up
            | KeyInput::Down
            | KeyInput::Interrupt => return false,
        }
        true
    }

    /// Take the buffer, leaving the editor empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Discard the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineEditor {
        let mut editor = LineEditor::new();
        for c in text.chars() {
            editor.apply(KeyInput::Char(c));
        }
        editor
    }

    #[test]
    fn char_input_adds_to_buffer() {
        let editor = typed("hi");

        assert_eq!(editor.buffer(), "hi");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut editor = typed("ab");
        editor.apply(KeyInput::Backspace);

        assert_eq!(editor.buffer(), "a");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn take_clears_buffer() {
        let mut editor = typed("test");

        assert_eq!(editor.take(), "test");
        assert!(editor.is_empty());
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn cursor_movement() {
        let mut editor = typed("abc");

        editor.apply(KeyInput::Home);
        assert_eq!(editor.cursor(), 0);

        editor.apply(KeyInput::End);
        assert_eq!(editor.cursor(), 3);

        editor.apply(KeyInput::Left);
        assert_eq!(editor.cursor(), 2);

        editor.apply(KeyInput::Right);
        editor.apply(KeyInput::Right);
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn mid_buffer_edits_respect_multibyte_chars() {
        let mut editor = typed("héllo");
        editor.apply(KeyInput::Home);
        editor.apply(KeyInput::Right);
        editor.apply(KeyInput::Delete);
        editor.apply(KeyInput::Char('e'));

        assert_eq!(editor.buffer(), "hello");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn non_editing_keys_are_reported() {
        let mut editor = typed("x");

        assert!(!editor.apply(KeyInput::Enter));
        assert!(!editor.apply(KeyInput::Interrupt));
        assert_eq!(editor.buffer(), "x");
    }
}
