//! Word-boundary resolution around a cursor.
//!
//! Words are delimited by the single space character only; tabs, newlines and
//! other Unicode whitespace are part of a word. All offsets are character
//! offsets (not bytes), matching how an input widget reports its caret.

/// The only word separator recognised by the resolver and the tokenizer.
pub const SEPARATOR: char = ' ';

/// Word located around a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan<'a> {
    /// Offset one past the separator preceding the cursor (or 0)
    pub start: usize,
    /// Offset of the separator at or after the cursor (or the text length)
    pub end: usize,
    /// The word up to the cursor: `text[start..cursor]`
    pub word: &'a str,
}

impl WordSpan<'_> {
    /// Length of the full word in characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Byte index of the character at `char_pos`, or `text.len()` past the end.
pub fn byte_offset(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Locate the word containing `cursor`.
///
/// A cursor past the end of the text is clamped to its length.
pub fn locate(text: &str, cursor: usize) -> WordSpan<'_> {
    let cursor = cursor.min(text.chars().count());
    let cursor_byte = byte_offset(text, cursor);

    let left = &text[..cursor_byte];
    let start_byte = left.rfind(SEPARATOR).map_or(0, |i| i + SEPARATOR.len_utf8());
    let start = cursor - left[start_byte..].chars().count();

    let right = &text[cursor_byte..];
    let run = right.find(SEPARATOR).map_or(right, |i| &right[..i]);
    let end = cursor + run.chars().count();

    WordSpan {
        start,
        end,
        word: &text[start_byte..cursor_byte],
    }
}

/// The word up to the cursor, used for live trigger detection.
pub fn current_word(text: &str, cursor: usize) -> &str {
    locate(text, cursor).word
}

/// `(start, end)` of the full word under the cursor.
pub fn word_bounds(text: &str, cursor: usize) -> (usize, usize) {
    let span = locate(text, cursor);
    (span.start, span.end)
}
