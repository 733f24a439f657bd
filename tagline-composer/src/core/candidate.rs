//! Candidate list management
//!
//! Holds the suggestions returned for the current keyword together with the
//! active (highlighted) entry.

use tagline_engine::Suggestion;

/// Suggestions shown for an open search, with the active entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    candidates: Vec<Suggestion>,
    /// Index of the active candidate; always 0 when the list is empty
    active: usize,
}

impl CandidateList {
    pub fn new(candidates: Vec<Suggestion>) -> Self {
        Self {
            candidates,
            active: 0,
        }
    }

    /// Create a candidate list from labels, using the label as id
    pub fn from_labels(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let candidates = labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                Suggestion::new(label.clone(), label)
            })
            .collect();
        Self::new(candidates)
    }

    pub fn candidates(&self) -> &[Suggestion] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Index of the active candidate
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active candidate, if any
    pub fn selected(&self) -> Option<&Suggestion> {
        self.candidates.get(self.active)
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected().map(|s| s.label.as_str())
    }

    /// Move to the next candidate, wrapping to the first.
    ///
    /// Returns false (and changes nothing) when the list is empty.
    pub fn move_next(&mut self) -> bool {
        if self.candidates.is_empty() {
            return false;
        }
        self.active = (self.active + 1) % self.candidates.len();
        true
    }

    /// Move to the previous candidate, wrapping to the last.
    pub fn move_prev(&mut self) -> bool {
        if self.candidates.is_empty() {
            return false;
        }
        let len = self.candidates.len();
        self.active = (self.active + len - 1) % len;
        true
    }

    /// Make the candidate at `index` active
    pub fn select(&mut self, index: usize) -> Option<&Suggestion> {
        if index < self.candidates.len() {
            self.active = index;
            self.selected()
        } else {
            None
        }
    }

    /// Replace the candidates; the first one becomes active
    pub fn update(&mut self, candidates: Vec<Suggestion>) {
        self.candidates = candidates;
        self.active = 0;
    }
}
