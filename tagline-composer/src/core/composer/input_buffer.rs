//! InputBuffer: message text with a caret.

use tagline_engine::boundary::byte_offset;

/// Message text being composed, with the caret position.
#[derive(Debug, Clone, Default)]
pub(super) struct InputBuffer {
    pub text: String,
    /// Caret position (in characters, not bytes)
    pub cursor_pos: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_pos = 0;
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the whole text; the caret is clamped to the new length.
    pub fn set(&mut self, text: &str, cursor_pos: usize) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor_pos = cursor_pos.min(self.char_len());
    }

    /// Move the caret, clamped to the text length.
    pub fn move_to(&mut self, cursor_pos: usize) {
        self.cursor_pos = cursor_pos.min(self.char_len());
    }

    /// Insert text at the caret and move the caret past it.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let byte_pos = byte_offset(&self.text, self.cursor_pos);
        self.text.insert_str(byte_pos, text);
        self.cursor_pos += text.chars().count();
    }

    /// Replace the characters in `start..end` and put the caret at `cursor_pos`.
    pub fn replace_range(&mut self, start: usize, end: usize, with: &str, cursor_pos: usize) {
        let byte_start = byte_offset(&self.text, start);
        let byte_end = byte_offset(&self.text, end);
        self.text.replace_range(byte_start..byte_end, with);
        self.move_to(cursor_pos);
    }

    /// Remove the character at the given character position.
    pub fn remove_char_at(&mut self, char_pos: usize) -> Option<char> {
        let (byte_start, removed) = self.text.char_indices().nth(char_pos)?;
        self.text
            .replace_range(byte_start..byte_start + removed.len_utf8(), "");
        Some(removed)
    }

    /// Remove the character before the caret.
    pub fn remove_char_before_cursor(&mut self) -> Option<char> {
        if self.cursor_pos == 0 {
            return None;
        }
        self.cursor_pos -= 1;
        self.remove_char_at(self.cursor_pos)
    }

    /// Remove the character at the caret (delete key).
    pub fn remove_char_at_cursor(&mut self) -> Option<char> {
        self.remove_char_at(self.cursor_pos)
    }
}
