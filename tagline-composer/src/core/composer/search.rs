//! Candidate navigation, confirm-and-replace and lookup results

use tagline_engine::word_bounds;
use tracing::warn;

use super::*;
use crate::fetch::FetchOutcome;

impl Composer {
    /// Move the active candidate forward
    pub fn next_candidate(&mut self) -> ComposerResult {
        self.move_candidate(true)
    }

    /// Move the active candidate backward
    pub fn prev_candidate(&mut self) -> ComposerResult {
        self.move_candidate(false)
    }

    /// Wrapping move; not consumed when there is nothing to move through.
    pub(super) fn move_candidate(&mut self, forward: bool) -> ComposerResult {
        let Some(candidates) = self.state.candidates_mut() else {
            return ComposerResult::not_consumed();
        };
        let moved = if forward {
            candidates.move_next()
        } else {
            candidates.move_prev()
        };
        if !moved {
            return ComposerResult::not_consumed();
        }
        trace!("active candidate: {}", candidates.active_index());
        ComposerResult::consumed().with_action(ComposerAction::ShowCandidates(candidates.clone()))
    }

    /// Confirm: an open search is resolved first, submission happens only in Idle.
    pub fn confirm(&mut self) -> ComposerResult {
        if self.state.is_searching() {
            self.confirm_active()
        } else {
            self.submit()
        }
    }

    /// Pick the candidate at `index` (pointer selection) and confirm it
    pub fn select_candidate(&mut self, index: usize) -> ComposerResult {
        let selected = self
            .state
            .candidates_mut()
            .is_some_and(|candidates| candidates.select(index).is_some());
        if !selected {
            return ComposerResult::not_consumed();
        }
        self.confirm_active()
    }

    /// Close the suggestion list without touching the text
    pub fn dismiss(&mut self) -> ComposerResult {
        if !self.state.is_searching() {
            return ComposerResult::not_consumed();
        }
        self.leave_search();
        ComposerResult::consumed().with_action(ComposerAction::HideCandidates)
    }

    /// Replace the word under the caret with the active candidate.
    ///
    /// A no-op (but consumed) when the list is empty.
    pub(super) fn confirm_active(&mut self) -> ComposerResult {
        let ComposerState::Searching {
            trigger,
            candidates,
            ..
        } = &self.state
        else {
            return ComposerResult::consumed();
        };
        let Some(label) = candidates.selected_label() else {
            return ComposerResult::consumed();
        };
        let (trigger, label) = (*trigger, label.to_string());
        self.replace_word_with_tag(trigger, &label)
    }

    /// `buffer[..start] + trigger + label + " " + buffer[end..]`, where
    /// `start..end` is the full word at the caret.
    fn replace_word_with_tag(&mut self, trigger: Trigger, label: &str) -> ComposerResult {
        let (start, end) = word_bounds(&self.input_buf.text, self.input_buf.cursor_pos);
        let final_tag = trigger.tag(label);
        let caret = start + final_tag.chars().count() + 1;
        self.input_buf
            .replace_range(start, end, &format!("{} ", final_tag), caret);
        debug!(
            "confirmed {} at {}..{}, caret -> {}",
            final_tag, start, end, caret
        );
        self.confirmed_tags.insert(final_tag);
        self.leave_search();

        let actions = self.text_actions();
        ComposerResult::consumed()
            .with_actions(actions)
            .with_action(ComposerAction::HideCandidates)
    }

    /// Apply a lookup outcome from the suggestion fetcher.
    ///
    /// Outcomes from any generation other than the current one are dropped, so
    /// a slow lookup for an older keyword never replaces newer candidates. A
    /// failed lookup leaves the search open with no candidates.
    pub fn apply_suggestions(&mut self, outcome: FetchOutcome) -> ComposerResult {
        if outcome.generation != self.generation {
            debug!(
                "dropping stale suggestions for \"{}\" (generation {}, current {})",
                outcome.keyword, outcome.generation, self.generation
            );
            return ComposerResult::not_consumed();
        }

        let max_candidates = self.config.max_candidates;
        let Some(candidates) = self.state.candidates_mut() else {
            return ComposerResult::not_consumed();
        };

        let mut found = match outcome.result {
            Ok(found) => found,
            Err(e) => {
                warn!("suggestion lookup for \"{}\" failed: {}", outcome.keyword, e);
                Vec::new()
            }
        };
        found.truncate(max_candidates);
        candidates.update(found);

        if candidates.is_empty() {
            ComposerResult::consumed().with_action(ComposerAction::HideCandidates)
        } else {
            ComposerResult::consumed().with_action(ComposerAction::ShowCandidates(candidates.clone()))
        }
    }
}
