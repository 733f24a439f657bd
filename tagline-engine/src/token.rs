//! Token model shared by the tokenizer, the composer and the wire format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TriggerError;

/// Character that opens a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// `@` mention
    #[serde(rename = "@")]
    At,
    /// `#` topic
    #[serde(rename = "#")]
    Hash,
}

impl Trigger {
    pub fn as_char(self) -> char {
        match self {
            Trigger::At => '@',
            Trigger::Hash => '#',
        }
    }

    /// Trigger for a character, if it is one
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '@' => Some(Trigger::At),
            '#' => Some(Trigger::Hash),
            _ => None,
        }
    }

    /// Split a word into its trigger and the text after it.
    ///
    /// Returns `None` when the word does not start with a trigger character.
    pub fn strip(word: &str) -> Option<(Self, &str)> {
        let first = word.chars().next()?;
        let trigger = Self::from_char(first)?;
        Some((trigger, &word[first.len_utf8()..]))
    }

    /// `trigger + label`, e.g. `@alice`
    pub fn tag(self, label: &str) -> String {
        let mut tag = String::with_capacity(label.len() + 1);
        tag.push(self.as_char());
        tag.push_str(label);
        tag
    }
}

impl TryFrom<char> for Trigger {
    type Error = TriggerError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Self::from_char(ch).ok_or(TriggerError::NotATrigger(ch))
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A piece of a tokenized message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Token {
    /// Literal text run, including its trailing separator
    Text { value: String },
    /// Mention or topic; `label` excludes the trigger character
    Tag { trigger: Trigger, label: String },
}

impl Token {
    pub fn text(value: impl Into<String>) -> Self {
        Token::Text {
            value: value.into(),
        }
    }

    pub fn tag(trigger: Trigger, label: impl Into<String>) -> Self {
        Token::Tag {
            trigger,
            label: label.into(),
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Token::Tag { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text { value } => f.write_str(value),
            Token::Tag { trigger, label } => write!(f, "{}{}", trigger, label),
        }
    }
}
