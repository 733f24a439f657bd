//! Composer state machine states

use tagline_engine::Trigger;

use super::candidate::CandidateList;

/// The current state of the composer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComposerState {
    /// No open search; Enter submits the buffer
    #[default]
    Idle,

    /// The word under the caret starts with a trigger
    Searching {
        /// Trigger that opened the search
        trigger: Trigger,
        /// Word text after the trigger, up to the caret
        keyword: String,
        /// Suggestions for the keyword (possibly still those of an older keyword)
        candidates: CandidateList,
    },
}

impl ComposerState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, Self::Searching { .. })
    }

    pub fn trigger(&self) -> Option<Trigger> {
        match self {
            Self::Searching { trigger, .. } => Some(*trigger),
            Self::Idle => None,
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        match self {
            Self::Searching { keyword, .. } => Some(keyword),
            Self::Idle => None,
        }
    }

    /// Get candidates of an open search
    pub fn candidates(&self) -> Option<&CandidateList> {
        match self {
            Self::Searching { candidates, .. } => Some(candidates),
            Self::Idle => None,
        }
    }

    /// Get mutable reference to candidates
    pub fn candidates_mut(&mut self) -> Option<&mut CandidateList> {
        match self {
            Self::Searching { candidates, .. } => Some(candidates),
            Self::Idle => None,
        }
    }
}
