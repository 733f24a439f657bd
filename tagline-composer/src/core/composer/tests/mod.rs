//! Tests for the composer state machine

use super::*;
use crate::core::keycode::KeyModifiers;
use crate::fetch::{FetchOutcome, LookupError};
use tagline_engine::{Suggestion, Token, tokenize};

mod search;

fn press(ch: char) -> KeyEvent {
    KeyEvent::char(ch)
}

fn press_key(keysym: Keysym) -> KeyEvent {
    KeyEvent::press(keysym)
}

fn press_ctrl(keysym: Keysym) -> KeyEvent {
    KeyEvent::new(keysym, KeyModifiers::new().with_control(true), true)
}

fn type_str(composer: &mut Composer, text: &str) -> ComposerResult {
    let mut last = ComposerResult::not_consumed();
    for ch in text.chars() {
        last = composer.process_key(&press(ch));
    }
    last
}

fn suggestions(labels: &[&str]) -> Vec<Suggestion> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| Suggestion::new(format!("s{}", i), *label))
        .collect()
}

/// Successful outcome for the composer's current generation
fn current_outcome(composer: &Composer, labels: &[&str]) -> FetchOutcome {
    FetchOutcome {
        keyword: composer.state().keyword().unwrap_or_default().to_string(),
        generation: composer.generation(),
        result: Ok(suggestions(labels)),
    }
}

/// Composer searching `keyword` after typing `text`, with `labels` applied
fn searching_with(text: &str, labels: &[&str]) -> Composer {
    let mut composer = Composer::new();
    type_str(&mut composer, text);
    let outcome = current_outcome(&composer, labels);
    composer.apply_suggestions(outcome);
    composer
}

fn active_label(composer: &Composer) -> Option<&str> {
    composer.candidates().and_then(|c| c.selected_label())
}
