use super::*;

#[test]
fn test_trigger_opens_search() {
    let mut composer = Composer::new();
    let result = type_str(&mut composer, "hello @al");
    assert!(composer.is_searching());
    assert_eq!(composer.state().trigger(), Some(Trigger::At));
    assert_eq!(composer.state().keyword(), Some("al"));
    assert_eq!(
        result.fetch_request(),
        Some(&FetchRequest::new("al", composer.generation()))
    );
}

#[test]
fn test_hash_trigger() {
    let mut composer = Composer::new();
    type_str(&mut composer, "#ur");
    assert_eq!(composer.state().trigger(), Some(Trigger::Hash));
    assert_eq!(composer.state().keyword(), Some("ur"));
}

#[test]
fn test_bare_trigger_searches_empty_keyword() {
    let mut composer = Composer::new();
    let result = type_str(&mut composer, "@");
    assert_eq!(composer.state().keyword(), Some(""));
    assert_eq!(result.fetch_request().map(|r| r.keyword.as_str()), Some(""));
}

#[test]
fn test_trigger_inside_word_does_not_search() {
    let mut composer = Composer::new();
    let result = type_str(&mut composer, "mail@ex");
    assert!(composer.state().is_idle());
    assert!(result.fetch_request().is_none());
}

#[test]
fn test_space_closes_search() {
    let mut composer = Composer::new();
    type_str(&mut composer, "@bob");
    let result = composer.process_key(&press(' '));
    assert!(composer.state().is_idle());
    assert!(result.actions.contains(&ComposerAction::HideCandidates));
}

#[test]
fn test_backspace_reopens_search() {
    let mut composer = Composer::new();
    type_str(&mut composer, "@bob ");
    assert!(composer.state().is_idle());
    let result = composer.process_key(&press_key(Keysym::BACKSPACE));
    assert_eq!(composer.state().keyword(), Some("bob"));
    assert!(result.fetch_request().is_some());
}

#[test]
fn test_backspace_over_trigger_closes_search() {
    let mut composer = Composer::new();
    type_str(&mut composer, "a @");
    assert!(composer.is_searching());
    composer.process_key(&press_key(Keysym::BACKSPACE));
    assert!(composer.state().is_idle());
}

#[test]
fn test_each_keyword_change_gets_a_new_generation() {
    let mut composer = Composer::new();
    let first = type_str(&mut composer, "@a");
    let second = composer.process_key(&press('b'));
    let g1 = first.fetch_request().unwrap().generation;
    let g2 = second.fetch_request().unwrap().generation;
    assert!(g2 > g1);
    assert_eq!(g2, composer.generation());
}

#[test]
fn test_keyword_stops_at_caret() {
    let mut composer = Composer::new();
    composer.handle_change("hi @alice there", 6);
    assert_eq!(composer.state().keyword(), Some("al"));
}

#[test]
fn test_handle_change_opens_and_closes_search() {
    let mut composer = Composer::new();
    let result = composer.handle_change("ping #op", 8);
    assert_eq!(composer.state().keyword(), Some("op"));
    assert!(result.fetch_request().is_some());

    let result = composer.handle_change("ping #op now", 12);
    assert!(composer.state().is_idle());
    assert!(result.actions.contains(&ComposerAction::HideCandidates));
}

#[test]
fn test_escape_dismisses_search() {
    let mut composer = searching_with("@al", &["alice"]);
    let generation = composer.generation();
    let result = composer.process_key(&press_key(Keysym::ESCAPE));
    assert!(result.consumed);
    assert_eq!(result.actions, vec![ComposerAction::HideCandidates]);
    assert!(composer.state().is_idle());
    assert_eq!(composer.text(), "@al");
    // Lookups issued before the dismissal are stale now
    assert!(composer.generation() > generation);
}

#[test]
fn test_caret_move_keeps_search_open() {
    let mut composer = searching_with("@al", &["alice"]);
    composer.process_key(&press_key(Keysym::LEFT));
    assert!(composer.is_searching());
    assert_eq!(composer.caret(), 2);
}
