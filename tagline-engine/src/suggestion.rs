//! Suggestion labels and the store's matching rule

use serde::{Deserialize, Serialize};

/// Default number of matches a store returns for one query.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// A mentionable entity offered in the autocomplete list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub label: String,
}

impl Suggestion {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Case-insensitive substring match, first `limit` hits in store order.
///
/// A blank query matches nothing.
pub fn filter_suggestions<'a, I>(suggestions: I, query: &str, limit: usize) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a Suggestion>,
{
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    suggestions
        .into_iter()
        .filter(|s| s.label.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}
