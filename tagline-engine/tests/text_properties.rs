use std::collections::HashSet;

use proptest::prelude::*;
use tagline_engine::{Token, Trigger, highlight, join_tokens, locate, tokenize};

fn normalized(text: &str) -> String {
    let parts: Vec<&str> = text.split(' ').filter(|p| !p.trim().is_empty()).collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("{} ", parts.join(" "))
    }
}

proptest! {
    #[test]
    fn locate_brackets_cursor(text in "[ab@# ]{0,24}", cursor in 0usize..30) {
        let len = text.chars().count();
        let span = locate(&text, cursor);
        let c = cursor.min(len);
        prop_assert!(span.start <= c && c <= span.end);
        prop_assert!(span.end <= len);

        let word: String = text.chars().skip(span.start).take(span.len()).collect();
        prop_assert!(!word.contains(' '));
        prop_assert!(word.starts_with(span.word));
    }

    #[test]
    fn join_reverses_tokenize(parts in prop::collection::vec("[a-z@#]{1,6}", 0..8), gaps in prop::collection::vec(1usize..3, 8)) {
        let mut text = String::new();
        for (part, gap) in parts.iter().zip(&gaps) {
            text.push_str(part);
            text.push_str(&" ".repeat(*gap));
        }
        prop_assert_eq!(join_tokens(&tokenize(&text)), normalized(&text));
    }

    #[test]
    fn highlight_is_idempotent(text in "[ab@#_ .]{0,24}") {
        let confirmed: HashSet<String> = ["@a", "#b", "@ab_"].iter().map(|s| s.to_string()).collect();
        let first = highlight(&text, &confirmed);
        prop_assert_eq!(first.plain_text(), text.clone());
        prop_assert_eq!(highlight(&first.plain_text(), &confirmed), first);
    }
}

#[test]
fn test_submit_tokens_in_order() {
    assert_eq!(
        tokenize("hi @bob #urgent"),
        vec![
            Token::text("hi "),
            Token::tag(Trigger::At, "bob"),
            Token::tag(Trigger::Hash, "urgent"),
        ]
    );
}

#[test]
fn test_tokens_survive_json() {
    let tokens = tokenize("ship it #release @ops");
    let json = serde_json::to_string(&tokens).unwrap();
    let back: Vec<Token> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tokens);
    assert!(json.contains(r##"{"type":"tag","trigger":"#","label":"release"}"##));
}

#[test]
fn test_typed_tag_tokenized_but_not_highlighted() {
    let text = "cc @typo @alice";
    let confirmed: HashSet<String> = HashSet::from(["@alice".to_string()]);

    let tags = tokenize(text).into_iter().filter(Token::is_tag).count();
    assert_eq!(tags, 2);

    let marked = highlight(text, &confirmed).spans();
    assert_eq!(marked.len(), 1);
    assert_eq!((marked[0].start, marked[0].end), (9, 15));
}
