use crossterm::event::KeyCode;

/// Single-line editing buffer for the focused text control.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

/// Result of feeding a key to a [`TextInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// The text changed
    Changed,
    /// Only the cursor moved
    Moved,
    /// The key is not an editing key
    Ignored,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text with the cursor at the end
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

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_index(self.cursor - 1);
        let end = self.byte_index(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Edit {
        let len = self.text.chars().count();
        match key {
            KeyCode::Char(c) => {
                self.insert_char(c);
                Edit::Changed
            }
            KeyCode::Backspace => {
                if self.backspace() {
                    Edit::Changed
                } else {
                    Edit::Moved
                }
            }
            KeyCode::Delete => {
                if self.delete() {
                    Edit::Changed
                } else {
                    Edit::Moved
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Edit::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                Edit::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                Edit::Moved
            }
            KeyCode::End => {
                self.cursor = len;
                Edit::Moved
            }
            _ => Edit::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = TextInput::new();
        for c in "héllo".chars() {
            input.handle_key(KeyCode::Char(c));
        }
        assert_eq!(input.text(), "héllo");
        assert_eq!(input.handle_key(KeyCode::Backspace), Edit::Changed);
        assert_eq!(input.text(), "héll");
    }

    #[test]
    fn test_cursor_movement_with_multibyte() {
        let mut input = TextInput::with_text("añb");
        input.handle_key(KeyCode::Left);
        input.handle_key(KeyCode::Left);
        input.handle_key(KeyCode::Delete);
        assert_eq!(input.text(), "ab");
        input.handle_key(KeyCode::Home);
        assert_eq!(input.handle_key(KeyCode::Backspace), Edit::Moved);
        input.handle_key(KeyCode::Char('>'));
        assert_eq!(input.text(), ">ab");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut input = TextInput::with_text("x");
        assert_eq!(input.handle_key(KeyCode::Enter), Edit::Ignored);
        assert_eq!(input.handle_key(KeyCode::Tab), Edit::Ignored);
        assert_eq!(input.text(), "x");
    }
}
