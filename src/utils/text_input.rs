use crossterm::event::KeyCode;

/// A single-line text input with a character-indexed cursor.
///
/// # Example
/// ```
/// use mcqdesk::utils::text_input::TextInput;
///
/// let mut input = TextInput::new();
/// input.insert_char('4');
/// input.insert_char('2');
/// assert_eq!(input.text(), "42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text input with initial text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Trimmed text, or `None` when only whitespace was entered.
    pub fn non_empty(&self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Check if the text is empty (ignoring whitespace).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        handle_char_insertion(&mut self.text, &mut self.cursor, c);
    }

    pub fn backspace(&mut self) {
        handle_backspace(&mut self.text, &mut self.cursor);
    }

    pub fn delete(&mut self) {
        handle_delete(&mut self.text, &mut self.cursor);
    }

    pub fn move_left(&mut self) {
        handle_cursor_movement(&self.text, &mut self.cursor, KeyCode::Left);
    }

    pub fn move_right(&mut self) {
        handle_cursor_movement(&self.text, &mut self.cursor, KeyCode::Right);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Handle an editing or cursor key.
    ///
    /// Returns true if the key was consumed.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => {
                handle_char_insertion(&mut self.text, &mut self.cursor, c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {
                handle_cursor_movement(&self.text, &mut self.cursor, key_code);
                true
            }
            _ => false,
        }
    }
}

fn handle_char_insertion(text: &mut String, cursor_pos: &mut usize, c: char) {
    if c.is_control() {
        return;
    }
    let byte_index = text
        .char_indices()
        .map(|(i, _)| i)
        .nth(*cursor_pos)
        .unwrap_or(text.len());
    text.insert(byte_index, c);
    *cursor_pos = (*cursor_pos + 1).min(text.chars().count());
}

fn handle_cursor_movement(text: &str, cursor_pos: &mut usize, key_code: KeyCode) {
    match key_code {
        KeyCode::Left => {
            *cursor_pos = cursor_pos.saturating_sub(1);
        }
        KeyCode::Right => {
            if *cursor_pos < text.chars().count() {
                *cursor_pos += 1;
            }
        }
        KeyCode::Home => *cursor_pos = 0,
        KeyCode::End => *cursor_pos = text.chars().count(),
        _ => {}
    }
}

fn handle_backspace(text: &mut String, cursor_pos: &mut usize) {
    if *cursor_pos > 0 {
        let before_cursor = text.chars().take(*cursor_pos - 1);
        let after_cursor = text.chars().skip(*cursor_pos);
        *text = before_cursor.chain(after_cursor).collect();
        *cursor_pos -= 1;
    }
}

fn handle_delete(text: &mut String, cursor_pos: &mut usize) {
    if *cursor_pos < text.chars().count() {
        let before_cursor = text.chars().take(*cursor_pos);
        let after_cursor = text.chars().skip(*cursor_pos + 1);
        *text = before_cursor.chain(after_cursor).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::with_text("Paris");
        input.move_home();
        input.move_right();
        input.insert_char('x');
        assert_eq!(input.text(), "Pxaris");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_unicode_insert_and_backspace() {
        let mut input = TextInput::with_text("héllo");
        input.move_home();
        input.move_right();
        input.move_right();
        input.backspace();
        assert_eq!(input.text(), "hllo");

        input.insert_char('é');
        assert_eq!(input.text(), "héllo");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut input = TextInput::new();
        input.insert_char('\n');
        input.insert_char('\t');
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = TextInput::with_text("abc");
        input.move_home();
        input.backspace();
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut input = TextInput::with_text("abc");
        input.delete();
        assert_eq!(input.text(), "abc");

        input.move_left();
        input.delete();
        assert_eq!(input.text(), "ab");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_handle_key_reports_consumption() {
        let mut input = TextInput::new();
        assert!(input.handle_key(KeyCode::Char('a')));
        assert!(input.handle_key(KeyCode::Left));
        assert!(!input.handle_key(KeyCode::Tab));
        assert!(!input.handle_key(KeyCode::Enter));
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut input = TextInput::with_text("notes.pdf");
        input.clear();
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
        input.insert_char('a');
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let input = TextInput::with_text("   ");
        assert!(input.is_empty());
        assert_eq!(input.non_empty(), None);
        assert_eq!(TextInput::with_text(" x ").non_empty(), Some("x".to_string()));
    }
}
