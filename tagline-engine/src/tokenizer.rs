//! Message tokenizer
//!
//! Splits a finished message on single spaces. Every word that starts with a
//! trigger character becomes a [`Token::Tag`], whether or not the user picked
//! it from the suggestion list; confirmation only changes highlighting.

use tracing::trace;

use crate::boundary::SEPARATOR;
use crate::token::{Token, Trigger};

/// Tokenize `text` into text runs and tags.
pub fn tokenize(text: &str) -> Vec<Token> {
    let tokens: Vec<Token> = text
        .split(SEPARATOR)
        .filter(|part| !part.trim().is_empty())
        .map(|part| match Trigger::strip(part) {
            Some((trigger, label)) => Token::tag(trigger, label),
            None => Token::text(format!("{}{}", part, SEPARATOR)),
        })
        .collect();
    trace!("tokenize: {} chars -> {} tokens", text.len(), tokens.len());
    tokens
}

/// Render tokens back to text.
///
/// Text runs already carry their trailing separator; tags get one appended so
/// adjacent tags stay apart. The result equals the tokenized input up to
/// separator normalization (runs of spaces collapse, one trailing space).
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Text { value } => out.push_str(value),
            Token::Tag { trigger, label } => {
                out.push(trigger.as_char());
                out.push_str(label);
                out.push(SEPARATOR);
            }
        }
    }
    out
}

/// Labels of all tags in a token stream, with their trigger.
pub fn tags(tokens: &[Token]) -> impl Iterator<Item = (Trigger, &str)> {
    tokens.iter().filter_map(|token| match token {
        Token::Tag { trigger, label } => Some((*trigger, label.as_str())),
        Token::Text { .. } => None,
    })
}
