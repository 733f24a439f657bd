pub mod boundary;
pub mod error;
pub mod highlight;
pub mod suggestion;
pub mod token;
pub mod tokenizer;

pub use boundary::{WordSpan, current_word, locate, word_bounds};
pub use error::TriggerError;
pub use highlight::{HighlightSpan, Highlighted, Segment, SegmentKind, highlight};
pub use suggestion::{DEFAULT_SUGGESTION_LIMIT, Suggestion, filter_suggestions};
pub use token::{Token, Trigger};
pub use tokenizer::{join_tokens, tokenize};
