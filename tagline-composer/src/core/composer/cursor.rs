//! Caret movement and character deletion

use super::*;

impl Composer {
    /// Caret moves do not re-run trigger detection; an open search stays open
    /// until the next edit.
    fn move_caret(&mut self, new_pos: usize) -> ComposerResult {
        self.input_buf.move_to(new_pos);
        ComposerResult::consumed().with_action(ComposerAction::PlaceCaret(self.input_buf.cursor_pos))
    }

    pub(super) fn backspace(&mut self) -> ComposerResult {
        if self.input_buf.remove_char_before_cursor().is_none() {
            // Nothing to delete
            return ComposerResult::consumed();
        }
        self.after_edit()
    }

    pub(super) fn delete(&mut self) -> ComposerResult {
        if self.input_buf.remove_char_at_cursor().is_none() {
            return ComposerResult::consumed();
        }
        self.after_edit()
    }

    pub(super) fn move_caret_left(&mut self) -> ComposerResult {
        let new_pos = self.input_buf.cursor_pos.saturating_sub(1);
        self.move_caret(new_pos)
    }

    pub(super) fn move_caret_right(&mut self) -> ComposerResult {
        let new_pos = self.input_buf.cursor_pos + 1;
        self.move_caret(new_pos)
    }

    pub(super) fn move_caret_home(&mut self) -> ComposerResult {
        self.move_caret(0)
    }

    pub(super) fn move_caret_end(&mut self) -> ComposerResult {
        let total = self.input_buf.char_len();
        self.move_caret(total)
    }
}
