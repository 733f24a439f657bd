//! Plain submit of the buffer

use tagline_engine::tokenize;

use super::*;

impl Composer {
    /// Tokenize the buffer for the send path.
    ///
    /// The buffer is left untouched; call [`Composer::complete_submit`] once
    /// the message was accepted. Blank buffers are not submitted.
    pub(super) fn submit(&mut self) -> ComposerResult {
        if self.input_buf.text.trim().is_empty() {
            return ComposerResult::consumed();
        }
        let tokens = tokenize(&self.input_buf.text);
        debug!("submit: {} tokens", tokens.len());
        ComposerResult::consumed().with_action(ComposerAction::Submit(tokens))
    }

    /// Clear the buffer and confirmed tags after a successful send
    pub fn complete_submit(&mut self) -> ComposerResult {
        self.reset();
        let actions = self.text_actions();
        ComposerResult::consumed()
            .with_actions(actions)
            .with_action(ComposerAction::HideCandidates)
    }
}
