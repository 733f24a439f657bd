//! tagline-composer: chat message composer with `@`/`#` mention autocomplete
//!
//! The composer tracks the word under the caret, opens a search when it starts
//! with a trigger character, and replaces the word with the picked suggestion.
//! Lookups are debounced and generation-stamped by [`fetch::SuggestionFetcher`];
//! [`session::ComposerSession`] connects it all to the chat collaborators.

pub mod chat;
pub mod config;
pub mod core;
pub mod fetch;
pub mod session;

pub use chat::{ChatStore, Message, MessageSender, NewMessage, RoomChannel, RoomHub, SendError};
pub use config::Settings;
pub use core::candidate::CandidateList;
pub use core::composer::{
    Composer, ComposerAction, ComposerConfig, ComposerResult, FetchRequest,
};
pub use core::keycode::{KeyEvent, KeyModifiers, Keysym};
pub use core::state::ComposerState;
pub use fetch::{FetchOutcome, LookupError, MemorySource, SuggestionFetcher, SuggestionSource};
pub use session::{ComposerSession, Participant};
