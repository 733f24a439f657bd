//! Key handling for the Idle and Searching states

use super::*;

impl Composer {
    /// Keys with a meaning specific to an open search.
    ///
    /// Returns `None` for keys that edit or move like in Idle.
    pub(super) fn process_key_searching(&mut self, key: &KeyEvent) -> Option<ComposerResult> {
        let ctrl = key.modifiers.control_key;
        let result = match key.keysym {
            Keysym::RETURN | Keysym::TAB if !ctrl => self.confirm_active(),
            Keysym::DOWN => self.move_candidate(true),
            Keysym::UP => self.move_candidate(false),
            Keysym::KEY_N | Keysym::KEY_N_UPPER if ctrl => self.move_candidate(true),
            Keysym::KEY_P | Keysym::KEY_P_UPPER if ctrl => self.move_candidate(false),
            Keysym::ESCAPE => self.dismiss(),
            _ => return None,
        };
        Some(result)
    }

    /// Editing, caret movement and submit
    pub(super) fn process_key_editing(&mut self, key: &KeyEvent) -> ComposerResult {
        if key.modifiers.control_key {
            return match key.keysym {
                Keysym::KEY_A | Keysym::KEY_A_UPPER => self.move_caret_home(),
                Keysym::KEY_E | Keysym::KEY_E_UPPER => self.move_caret_end(),
                Keysym::KEY_B | Keysym::KEY_B_UPPER => self.move_caret_left(),
                Keysym::KEY_F | Keysym::KEY_F_UPPER => self.move_caret_right(),
                _ => ComposerResult::not_consumed(),
            };
        }

        match key.keysym {
            Keysym::RETURN => self.confirm(),
            Keysym::BACKSPACE => self.backspace(),
            Keysym::DELETE => self.delete(),
            Keysym::LEFT => self.move_caret_left(),
            Keysym::RIGHT => self.move_caret_right(),
            Keysym::HOME => self.move_caret_home(),
            Keysym::END => self.move_caret_end(),
            _ => match key.to_char() {
                Some(ch) => self.insert_char(ch),
                None => ComposerResult::not_consumed(),
            },
        }
    }

    /// Insert a typed character at the caret
    pub fn insert_char(&mut self, ch: char) -> ComposerResult {
        let mut buf = [0u8; 4];
        self.input_buf.insert(ch.encode_utf8(&mut buf));
        self.after_edit()
    }

    /// Redraw and re-detect the search after the composer changed the buffer
    pub(super) fn after_edit(&mut self) -> ComposerResult {
        let actions = self.text_actions();
        ComposerResult::consumed()
            .with_actions(actions)
            .with_actions(self.refresh_search())
    }
}
