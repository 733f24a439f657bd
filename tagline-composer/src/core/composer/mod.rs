//! Composer - the mention/tag state machine behind the message input
//!
//! `Composer` owns the message buffer, the caret and the set of confirmed
//! tags. Every key event or external edit re-resolves the word under the caret;
//! a word that starts with a trigger opens (or refines) a search and asks the
//! suggestion fetcher for candidates. Lookups are generation-stamped so that
//! only the outcome for the newest request is ever applied.

mod cursor;
mod input;
mod input_buffer;
mod search;
mod submit;
mod types;

pub use types::*;

use input_buffer::InputBuffer;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use tagline_engine::{Highlighted, Trigger, current_word, highlight};
use tracing::{debug, trace};

use super::candidate::CandidateList;
use super::keycode::{KeyEvent, Keysym};
use super::state::ComposerState;
use crate::config::settings::Settings;

/// The message composer
pub struct Composer {
    /// Current search state
    state: ComposerState,
    /// Message text and caret
    input_buf: InputBuffer,
    /// Exact `trigger + label` strings picked from the suggestion list
    confirmed_tags: HashSet<String>,
    /// Stamp of the newest suggestion request; outcomes with any other stamp are stale
    generation: u64,
    config: ComposerConfig,
}

impl Composer {
    pub fn new() -> Self {
        Self::with_config(ComposerConfig::default())
    }

    pub fn with_config(config: ComposerConfig) -> Self {
        Self {
            state: ComposerState::Idle,
            input_buf: InputBuffer::new(),
            confirmed_tags: HashSet::new(),
            generation: 0,
            config,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_config(ComposerConfig::from(&settings.composer))
    }

    pub fn state(&self) -> &ComposerState {
        &self.state
    }

    pub fn is_searching(&self) -> bool {
        self.state.is_searching()
    }

    /// Current buffer text
    pub fn text(&self) -> &str {
        &self.input_buf.text
    }

    /// Caret position in characters
    pub fn caret(&self) -> usize {
        self.input_buf.cursor_pos
    }

    pub fn candidates(&self) -> Option<&CandidateList> {
        self.state.candidates()
    }

    pub fn confirmed_tags(&self) -> &HashSet<String> {
        &self.confirmed_tags
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Overlay for the current buffer with confirmed tags marked
    pub fn highlighted(&self) -> Highlighted {
        highlight(&self.input_buf.text, &self.confirmed_tags)
    }

    /// Reset everything (unmount). Lookups still in flight become stale.
    pub fn reset(&mut self) {
        self.state = ComposerState::Idle;
        self.input_buf.clear();
        self.confirmed_tags.clear();
        self.invalidate();
    }

    /// Process a key event
    pub fn process_key(&mut self, key: &KeyEvent) -> ComposerResult {
        // Modifier-only keys and releases: pass through
        if key.keysym.is_modifier() || !key.is_press {
            return ComposerResult::not_consumed();
        }

        trace!("Processing key: {:?} in state: {:?}", key.keysym, self.state);

        if self.state.is_searching()
            && let Some(result) = self.process_key_searching(key)
        {
            return result;
        }
        self.process_key_editing(key)
    }

    /// Text changed outside the composer (e.g. a UI-owned input widget).
    ///
    /// The caret is clamped to the new text length.
    pub fn handle_change(&mut self, text: &str, caret: usize) -> ComposerResult {
        self.input_buf.set(text, caret);
        debug!(
            "handle_change: {} chars, caret={}",
            self.input_buf.char_len(),
            self.input_buf.cursor_pos
        );
        ComposerResult::consumed()
            .with_action(ComposerAction::UpdateHighlight(self.highlighted()))
            .with_actions(self.refresh_search())
    }

    /// Re-resolve the word under the caret and open, refine or close the search.
    fn refresh_search(&mut self) -> Vec<ComposerAction> {
        let word = current_word(&self.input_buf.text, self.input_buf.cursor_pos);
        match Trigger::strip(word) {
            Some((trigger, keyword)) => {
                let keyword = keyword.to_string();
                // Candidates belong to one keyword; the list stays empty until its lookup lands
                let had_candidates = self
                    .state
                    .candidates()
                    .is_some_and(|list| !list.is_empty());
                self.generation += 1;
                debug!(
                    "search {}: keyword=\"{}\" generation={}",
                    trigger, keyword, self.generation
                );
                self.state = ComposerState::Searching {
                    trigger,
                    keyword: keyword.clone(),
                    candidates: CandidateList::default(),
                };
                let mut actions = Vec::with_capacity(2);
                if had_candidates {
                    actions.push(ComposerAction::HideCandidates);
                }
                actions.push(ComposerAction::RequestSuggestions(FetchRequest::new(
                    keyword,
                    self.generation,
                )));
                actions
            }
            None if self.state.is_searching() => {
                self.leave_search();
                vec![ComposerAction::HideCandidates]
            }
            None => Vec::new(),
        }
    }

    /// Close an open search; pending lookups become stale.
    fn leave_search(&mut self) {
        self.state = ComposerState::Idle;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Actions that redraw the buffer and caret after the composer edited it
    fn text_actions(&self) -> [ComposerAction; 3] {
        [
            ComposerAction::UpdateText(self.input_buf.text.clone()),
            ComposerAction::PlaceCaret(self.input_buf.cursor_pos),
            ComposerAction::UpdateHighlight(self.highlighted()),
        ]
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}
