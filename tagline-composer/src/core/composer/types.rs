//! Type definitions for the composer

use tagline_engine::{Highlighted, Token};

use crate::config::settings::ComposerSettings;

use super::super::candidate::CandidateList;

/// Action to be performed by the UI / session layer, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerAction {
    /// Replace the input text
    UpdateText(String),
    /// Move the caret (character offset); applied after any preceding text update
    PlaceCaret(usize),
    /// Redraw the confirmed-tag overlay
    UpdateHighlight(Highlighted),
    /// Ask the suggestion fetcher for candidates
    RequestSuggestions(FetchRequest),
    /// Show the suggestion list
    ShowCandidates(CandidateList),
    /// Hide the suggestion list
    HideCandidates,
    /// Deliver the tokenized buffer to the send path
    Submit(Vec<Token>),
}

/// Result of processing a key event or edit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposerResult {
    /// Whether the key was consumed by the composer
    pub consumed: bool,
    /// Actions to perform
    pub actions: Vec<ComposerAction>,
}

impl ComposerResult {
    pub fn consumed() -> Self {
        Self {
            consumed: true,
            actions: Vec::new(),
        }
    }

    pub fn not_consumed() -> Self {
        Self {
            consumed: false,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: ComposerAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = ComposerAction>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// The suggestion request carried by this result, if any
    pub fn fetch_request(&self) -> Option<&FetchRequest> {
        self.actions.iter().find_map(|action| match action {
            ComposerAction::RequestSuggestions(request) => Some(request),
            _ => None,
        })
    }
}

/// A suggestion lookup stamped with the composer generation that issued it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub keyword: String,
    pub generation: u64,
}

impl FetchRequest {
    pub fn new(keyword: impl Into<String>, generation: u64) -> Self {
        Self {
            keyword: keyword.into(),
            generation,
        }
    }
}

/// Configuration for the composer
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Candidates beyond this count are dropped from a lookup result
    pub max_candidates: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_candidates: tagline_engine::DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl From<&ComposerSettings> for ComposerConfig {
    fn from(settings: &ComposerSettings) -> Self {
        Self {
            max_candidates: settings.max_candidates,
        }
    }
}
